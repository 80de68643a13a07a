//! CSS selector subset understood by [`MemoryDom`](super::MemoryDom).
//!
//! Supported: type and universal selectors, `#id`, `.class`, `[attr]`,
//! `[attr=value]` (quoted or bare), `:checked`, descendant and child
//! combinators, and comma-separated lists. This covers every selector the
//! widgets use; the browser host hands selectors to the real engine instead.

use thiserror::Error;

use super::NodeId;

/// Errors produced when a selector falls outside the supported subset.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected {found:?} at offset {position} in {selector:?}")]
    Unexpected { selector: String, position: usize, found: char },

    #[error("unsupported pseudo-class :{name}")]
    UnsupportedPseudo { name: String },

    #[error("unterminated attribute selector in {selector:?}")]
    Unterminated { selector: String },
}

/// Element accessors needed to evaluate a selector.
pub(crate) trait SelectorHost {
    fn tag_name(&self, node: NodeId) -> &str;
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;
    fn class_list_contains(&self, node: NodeId, class: &str) -> bool;
    fn checked(&self, node: NodeId) -> bool;
    fn parent_node(&self, node: NodeId) -> Option<NodeId>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
    checked: bool,
}

impl Compound {
    fn matches<H: SelectorHost + ?Sized>(&self, host: &H, node: NodeId) -> bool {
        if let Some(tag) = &self.tag {
            if host.tag_name(node) != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if host.attribute(node, "id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| host.class_list_contains(node, c)) {
            return false;
        }
        let attrs_ok = self.attrs.iter().all(|a| match (&a.value, host.attribute(node, &a.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        });
        attrs_ok && (!self.checked || host.checked(node))
    }
}

/// One complex selector: compounds joined by combinators, left to right.
/// The combinator stored with part `i` relates it to part `i - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    parts: Vec<(Combinator, Compound)>,
}

impl Complex {
    fn matches<H: SelectorHost + ?Sized>(&self, host: &H, node: NodeId) -> bool {
        self.parts.len().checked_sub(1).is_some_and(|last| self.matches_from(host, last, node))
    }

    fn matches_from<H: SelectorHost + ?Sized>(&self, host: &H, index: usize, node: NodeId) -> bool {
        let Some((combinator, compound)) = self.parts.get(index) else {
            return false;
        };
        if !compound.matches(host, node) {
            return false;
        }
        let Some(previous) = index.checked_sub(1) else {
            return true;
        };
        match combinator {
            Combinator::Child => {
                host.parent_node(node).is_some_and(|p| self.matches_from(host, previous, p))
            },
            Combinator::Descendant => {
                let mut ancestor = host.parent_node(node);
                while let Some(a) = ancestor {
                    if self.matches_from(host, previous, a) {
                        return true;
                    }
                    ancestor = host.parent_node(a);
                }
                false
            },
        }
    }
}

/// Parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<Complex>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser::new(input).parse_list()
    }

    pub(crate) fn matches<H: SelectorHost + ?Sized>(&self, host: &H, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(host, node))
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, chars: source.chars().collect(), pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(found) => SelectorError::Unexpected {
                selector: self.source.to_string(),
                position: self.pos,
                found,
            },
            None => SelectorError::Unterminated { selector: self.source.to_string() },
        }
    }

    fn parse_list(mut self) -> Result<SelectorList, SelectorError> {
        if self.source.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            selectors.push(self.parse_complex()?);
            self.skip_ws();
            match self.bump() {
                None => break,
                Some(',') => {},
                Some(_) => {
                    self.pos -= 1;
                    return Err(self.unexpected());
                },
            }
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self) -> Result<Complex, SelectorError> {
        let mut parts = vec![(Combinator::Descendant, self.parse_compound()?)];
        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_ws();
                    Combinator::Child
                },
                Some(_) if had_ws => Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
            };
            parts.push((combinator, self.parse_compound()?));
        }
        Ok(Complex { parts })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let start = self.pos;
        let mut compound = Compound::default();

        if self.peek() == Some('*') {
            self.pos += 1;
        } else if self.peek().is_some_and(is_ident_char) {
            compound.tag = Some(self.ident()?.to_ascii_lowercase());
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.ident()?);
                },
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.ident()?);
                },
                Some('[') => {
                    self.pos += 1;
                    compound.attrs.push(self.attribute()?);
                },
                Some(':') => {
                    self.pos += 1;
                    let name = self.ident()?;
                    if name != "checked" {
                        return Err(SelectorError::UnsupportedPseudo { name });
                    }
                    compound.checked = true;
                },
                _ => break,
            }
        }

        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(compound)
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn attribute(&mut self) -> Result<AttrMatch, SelectorError> {
        self.skip_ws();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_ws();
        let value = match self.bump() {
            Some(']') => return Ok(AttrMatch { name, value: None }),
            Some('=') => {
                self.skip_ws();
                match self.peek() {
                    Some(quote @ ('"' | '\'')) => {
                        self.pos += 1;
                        let start = self.pos;
                        while self.peek().is_some_and(|c| c != quote) {
                            self.pos += 1;
                        }
                        let value: String = self.chars[start..self.pos].iter().collect();
                        if self.bump().is_none() {
                            return Err(SelectorError::Unterminated {
                                selector: self.source.to_string(),
                            });
                        }
                        value
                    },
                    _ => self.ident()?,
                }
            },
            Some(_) => {
                self.pos -= 1;
                return Err(self.unexpected());
            },
            None => return Err(SelectorError::Unterminated { selector: self.source.to_string() }),
        };
        self.skip_ws();
        match self.bump() {
            Some(']') => Ok(AttrMatch { name, value: Some(value) }),
            Some(_) => {
                self.pos -= 1;
                Err(self.unexpected())
            },
            None => Err(SelectorError::Unterminated { selector: self.source.to_string() }),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
