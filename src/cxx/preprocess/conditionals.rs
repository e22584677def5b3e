//! Conditional-compilation resolution
//!
//! Resolves one `#if`/`#ifdef`/`#ifndef` ... `#endif` block starting at the
//! cursor: tokens of kept branches stay, tokens of dropped branches
//! disappear, and every sibling directive line is preserved as a comment
//! token so the original structure remains visible in extracted text.
//! Nested blocks inside a kept branch are left untouched; the cursor
//! reaches them later and they resolve then.
//!
//! The rewrite is append-only: a fresh token vector is produced, never a
//! mutation of the shared input slice.

use crate::cxx::info::{Info, InfoTable};
use crate::cxx::lexing::{kw, Token, TokenKind};

/// Policy for conditionals that resolve neither through the symbol table
/// nor as an integer literal: treat the branch as taken. Dropping
/// unresolved branches instead would silently lose declarations behind
/// platform or feature gates.
pub const ASSUME_DEFINED_WHEN_UNRESOLVED: bool = true;

fn is_if_start(token: &Token) -> bool {
    *token == *kw::IF || *token == *kw::IFDEF || *token == *kw::IFNDEF
}

fn is_directive(token: &Token) -> bool {
    is_if_start(token)
        || *token == *kw::ELIF
        || *token == *kw::ELSE
        || *token == *kw::ENDIF
}

/// Resolve the conditional block starting at `index`, if there is one.
/// Returns the rewritten token vector, or None when the cursor is not on
/// an unresolved `#if`-family directive.
pub(crate) fn resolve_conditional(
    tokens: &[Token],
    index: usize,
    table: &InfoTable,
) -> Option<Vec<Token>> {
    if index + 1 >= tokens.len() || !tokens[index].is_char('#') || !is_if_start(&tokens[index + 1])
    {
        return None;
    }

    let mut out: Vec<Token> = tokens[..index].to_vec();
    let mut i = index;
    let mut count = 0i32;
    let mut info: Option<Info> = None;
    let mut define = true;
    let mut defined = false;

    while i < tokens.len() {
        let spacing = tokens[i].spacing.clone();
        let line_start = spacing.rfind('\n').map(|p| p + 1).unwrap_or(0);
        let mut keyword: Option<Token> = None;
        if tokens[i].is_char('#') && i + 1 < tokens.len() {
            if is_if_start(&tokens[i + 1]) {
                count += 1;
            }
            if count == 1 && is_directive(&tokens[i + 1]) {
                keyword = Some(tokens[i + 1].clone());
            }
            if tokens[i + 1] == *kw::ENDIF {
                count -= 1;
            }
        }
        if let Some(keyword) = keyword {
            i += 2;

            // keep the directive line as a comment
            let mut comment = Token::comment(format!(
                "// {}#{}{}",
                &spacing[line_start..],
                keyword.spacing,
                keyword.text
            ));
            comment.spacing = spacing[..line_start].to_string();

            if is_if_start(&keyword) || keyword == *kw::ELIF {
                let mut value = String::new();
                while i < tokens.len() {
                    if tokens[i].spacing.contains('\n') {
                        break;
                    }
                    if tokens[i].kind != TokenKind::Comment {
                        value.push_str(&tokens[i].spacing);
                        value.push_str(&tokens[i].text);
                    }
                    if tokens[i].text_is("\n") {
                        comment.text.push_str("\n// ");
                    } else {
                        comment.text.push_str(&tokens[i].spacing);
                        comment.text.push_str(&tokens[i].text);
                    }
                    i += 1;
                }
                define = match &info {
                    None => ASSUME_DEFINED_WHEN_UNRESOLVED,
                    Some(_) => !defined,
                };
                info = table.first(&value);
                if keyword == *kw::ELIF && defined {
                    // a sibling branch at this depth was already kept
                    define = false;
                } else if let Some(found) = &info {
                    define = if keyword == *kw::IFNDEF {
                        !found.define
                    } else {
                        found.define
                    };
                } else if let Ok(number) = value.trim().parse::<i64>() {
                    define = number != 0;
                }
                out.push(comment);
            } else if keyword == *kw::ELSE {
                define = !defined;
                out.push(comment);
            } else {
                // endif
                out.push(comment);
                if count == 0 {
                    break;
                }
            }
        } else if define {
            out.push(tokens[i].clone());
            i += 1;
        } else {
            i += 1;
        }
        defined = define || defined;
    }

    out.extend_from_slice(&tokens[i.min(tokens.len())..]);
    Some(out)
}
