use unicode_normalization::UnicodeNormalization;

/// Decompose `text` (NFKD) and drop everything outside ASCII, so
/// `"Não foi possível"` becomes `"Nao foi possivel"`.
pub fn ascii_fold(text: &str) -> String {
    text.nfkd().filter(char::is_ascii).collect()
}
