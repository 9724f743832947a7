/// ASCII whitespace, as understood by HTML attribute tokenization
pub const WHITESPACES: &[char] = &[' ', '\t', '\n', '\x0c', '\r'];
