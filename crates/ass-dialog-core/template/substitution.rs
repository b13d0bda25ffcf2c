//! Token substitution over compiled templates
//!
//! [`substitute`] is a literal, non-overlapping, left-to-right replace that
//! returns a fresh buffer. [`render`] chains one `substitute` per mapped token
//! in [`Token::ALL`] order.
//!
//! # Re-substitution hazard
//!
//! Because each pass rescans the output of the previous one, a value that
//! contains the marker of a *later* token is expanded again. With an actor
//! named `!text`, the default template prints the dialogue text where the
//! actor should be. Values containing the marker of an *earlier* token are
//! left alone. [`SubstitutionMode::Simultaneous`] scans the template once and
//! never looks inside substituted values.

use super::tokens::Token;

/// How [`render`] applies a mapping to a template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubstitutionMode {
    /// One replace pass per token, each over the previous pass's output
    #[default]
    Sequential,
    /// A single scan of the template; substituted values are never rescanned
    Simultaneous,
}

/// Values to substitute, one optional slot per token
///
/// Iteration always follows [`Token::ALL`] order regardless of insertion
/// order. Unset tokens are left in the output as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    /// Replacement values indexed by [`Token::index`]
    values: [Option<Vec<u8>>; 7],
}

impl FieldMapping {
    /// Create an empty mapping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `token`, replacing any previous value
    pub fn insert(&mut self, token: Token, value: impl Into<Vec<u8>>) -> &mut Self {
        self.values[token.index()] = Some(value.into());
        self
    }

    /// Builder form of [`FieldMapping::insert`]
    #[must_use]
    pub fn with(mut self, token: Token, value: impl Into<Vec<u8>>) -> Self {
        self.insert(token, value);
        self
    }

    /// Value mapped to `token`
    #[must_use]
    pub fn get(&self, token: Token) -> Option<&[u8]> {
        self.values[token.index()].as_deref()
    }

    /// Number of mapped tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    /// Whether no token is mapped
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Mapped `(token, value)` pairs in substitution order
    pub fn iter(&self) -> impl Iterator<Item = (Token, &[u8])> {
        Token::ALL
            .into_iter()
            .filter_map(|token| self.get(token).map(|value| (token, value)))
    }
}

/// Byte offset of the first occurrence of `needle` in `haystack`
///
/// An empty needle never matches.
#[must_use]
pub fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Replace every non-overlapping occurrence of `token` with `value`
///
/// Scans left to right and resumes after each replaced occurrence, so
/// replacement text is never rescanned within this call. `template` is left
/// untouched; the result is a new buffer. An empty `token` yields a copy.
///
/// # Example
///
/// ```rust
/// use ass_dialog_core::template::substitute;
///
/// assert_eq!(substitute(b"!a and !a", b"!a", b"x"), b"x and x");
/// assert_eq!(substitute(b"aaa", b"aa", b"b"), b"ba");
/// ```
#[must_use]
pub fn substitute(template: &[u8], token: &[u8], value: &[u8]) -> Vec<u8> {
    if token.is_empty() {
        return template.to_vec();
    }

    let mut positions = Vec::new();
    let mut offset = 0;
    while let Some(found) = find_subslice(&template[offset..], token) {
        positions.push(offset + found);
        offset += found + token.len();
    }

    if positions.is_empty() {
        return template.to_vec();
    }

    let capacity = template.len() - positions.len() * token.len() + positions.len() * value.len();
    let mut result = Vec::with_capacity(capacity);
    let mut last = 0;
    for position in positions {
        result.extend_from_slice(&template[last..position]);
        result.extend_from_slice(value);
        last = position + token.len();
    }
    result.extend_from_slice(&template[last..]);
    result
}

/// Apply a mapping to a template
///
/// With [`SubstitutionMode::Sequential`] this is the chained pipeline
/// `substitute(substitute(t, !layer, ..), !start, ..)` and so on, including
/// the re-substitution hazard described in the module docs.
#[must_use]
pub fn render(template: &[u8], mapping: &FieldMapping, mode: SubstitutionMode) -> Vec<u8> {
    match mode {
        SubstitutionMode::Sequential => render_sequential(template, mapping),
        SubstitutionMode::Simultaneous => render_simultaneous(template, mapping),
    }
}

fn render_sequential(template: &[u8], mapping: &FieldMapping) -> Vec<u8> {
    mapping
        .iter()
        .fold(template.to_vec(), |output, (token, value)| {
            substitute(&output, token.marker_bytes(), value)
        })
}

fn render_simultaneous(template: &[u8], mapping: &FieldMapping) -> Vec<u8> {
    let mut result = Vec::with_capacity(template.len());
    let mut position = 0;

    while position < template.len() {
        let rest = &template[position..];
        // No marker is a prefix of another, so the first hit is the only one
        let hit = (rest[0] == b'!')
            .then(|| {
                mapping
                    .iter()
                    .find(|(token, _)| rest.starts_with(token.marker_bytes()))
            })
            .flatten();

        if let Some((token, value)) = hit {
            result.extend_from_slice(value);
            position += token.marker_bytes().len();
        } else {
            result.push(rest[0]);
            position += 1;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitute_replaces_every_occurrence() {
        assert_eq!(
            substitute(b"!text|!text|!text", b"!text", b"hi"),
            b"hi|hi|hi".to_vec()
        );
    }

    #[test]
    fn substitute_is_non_overlapping_left_to_right() {
        assert_eq!(substitute(b"aaaa", b"aa", b"b"), b"bb".to_vec());
        assert_eq!(substitute(b"aaa", b"aa", b"b"), b"ba".to_vec());
    }

    #[test]
    fn substitute_does_not_rescan_its_own_output() {
        assert_eq!(substitute(b"!a", b"!a", b"!a!a"), b"!a!a".to_vec());
    }

    #[test]
    fn substitute_without_match_returns_equal_copy() {
        let template = b"no tokens here";
        assert_eq!(substitute(template, b"!text", b"x"), template.to_vec());
        assert_eq!(substitute(template, b"", b"x"), template.to_vec());
        assert_eq!(substitute(b"", b"!text", b"x"), Vec::<u8>::new());
    }

    #[test]
    fn substitute_shrinks_and_grows() {
        assert_eq!(substitute(b"[!actor]", b"!actor", b""), b"[]".to_vec());
        assert_eq!(
            substitute(b"[!end]", b"!end", b"0:00:05.00"),
            b"[0:00:05.00]".to_vec()
        );
    }

    #[test]
    fn mapping_iterates_in_token_order() {
        let mapping = FieldMapping::new()
            .with(Token::Text, "t")
            .with(Token::Layer, "0")
            .with(Token::Actor, "a");

        let order: Vec<Token> = mapping.iter().map(|(token, _)| token).collect();
        assert_eq!(order, vec![Token::Layer, Token::Actor, Token::Text]);
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.get(Token::Actor), Some(&b"a"[..]));
        assert_eq!(mapping.get(Token::Style), None);
    }

    #[test]
    fn empty_mapping_leaves_template_unchanged() {
        let mapping = FieldMapping::new();
        assert!(mapping.is_empty());
        let template = b"!start-!end\t!actor\t!text\n";
        for mode in [SubstitutionMode::Sequential, SubstitutionMode::Simultaneous] {
            assert_eq!(render(template, &mapping, mode), template.to_vec());
        }
    }

    #[test]
    fn sequential_resubstitutes_later_tokens() {
        let mapping = FieldMapping::new()
            .with(Token::Actor, "!text")
            .with(Token::Text, "Hello");
        assert_eq!(
            render(b"!actor: !text", &mapping, SubstitutionMode::Sequential),
            b"Hello: Hello".to_vec()
        );
    }

    #[test]
    fn sequential_keeps_earlier_token_text() {
        let mapping = FieldMapping::new()
            .with(Token::Layer, "1")
            .with(Token::Text, "see !layer");
        assert_eq!(
            render(b"!layer|!text", &mapping, SubstitutionMode::Sequential),
            b"1|see !layer".to_vec()
        );
    }

    #[test]
    fn simultaneous_never_rescans_values() {
        let mapping = FieldMapping::new()
            .with(Token::Actor, "!text")
            .with(Token::Text, "Hello");
        assert_eq!(
            render(b"!actor: !text", &mapping, SubstitutionMode::Simultaneous),
            b"!text: Hello".to_vec()
        );
    }

    #[test]
    fn simultaneous_leaves_unmapped_markers() {
        let mapping = FieldMapping::new().with(Token::Text, "x");
        assert_eq!(
            render(b"!style !text !", &mapping, SubstitutionMode::Simultaneous),
            b"!style x !".to_vec()
        );
    }

    #[test]
    fn find_subslice_edges() {
        assert_eq!(find_subslice(b"abc", b"c"), Some(2));
        assert_eq!(find_subslice(b"abc", b"abcd"), None);
        assert_eq!(find_subslice(b"abc", b""), None);
    }
}
