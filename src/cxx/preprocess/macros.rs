//! Macro expansion
//!
//! A symbol-table entry whose source text reads `#define NAME ...` turns
//! the matching identifier into a macro. Object-like macros substitute
//! their body in place; function-like macros additionally consume the
//! parenthesized argument list and splice each argument wherever the
//! matching parameter name appears in the body. `##` pastes neighboring
//! replacement tokens together.

use crate::cxx::info::InfoTable;
use crate::cxx::lexing::{kw, Token, TokenKind, Tokenizer};

/// Hands out the body tokens of a macro definition one at a time,
/// yielding EOF tokens once exhausted.
struct BodyCursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl BodyCursor {
    fn new(source: &str) -> Self {
        BodyCursor {
            tokens: Tokenizer::new(source).tokenize(),
            pos: 0,
        }
    }

    fn next(&mut self) -> Token {
        let token = self.tokens.get(self.pos).cloned().unwrap_or_else(Token::eof);
        self.pos += 1;
        token
    }
}

/// Expand the macro invocation at `index`, if the token there names one.
/// Returns the rewritten token vector, or None when the token is not a
/// macro, its arguments are missing, or its stored text is not a
/// well-formed definition of the same name.
pub(crate) fn expand_macro(
    tokens: &[Token],
    index: usize,
    table: &InfoTable,
) -> Option<Vec<Token>> {
    if index >= tokens.len() || !table.contains(&tokens[index].text) {
        return None;
    }
    let start_index = index;
    let info = table.first(&tokens[index].text)?;
    let cpp_text = info.cpp_text.as_ref()?;
    let mut body = BodyCursor::new(cpp_text);
    if !body.next().is_char('#')
        || body.next() != *kw::DEFINE
        || !body.next().text_is(&info.cpp_names[0])
    {
        return None;
    }

    let mut out: Vec<Token> = tokens[..index].to_vec();
    let mut params: Vec<String> = Vec::new();
    let mut args: Vec<Vec<Token>> = Vec::new();
    let mut token = body.next();
    let mut name = tokens[index].text.clone();
    let mut index = index;
    if token.is_char('(') {
        // parameter names from the definition
        token = body.next();
        while !token.is_empty() {
            if token.kind == TokenKind::Identifier {
                params.push(token.text.clone());
            } else if token.is_char(')') {
                token = body.next();
                break;
            }
            token = body.next();
        }
        index += 1;
        if !params.is_empty() && (index >= tokens.len() || !tokens[index].is_char('(')) {
            // not an invocation, leave the bare identifier alone
            return None;
        }
        if index >= tokens.len() {
            return None;
        }
        name.push_str(&tokens[index].spacing);
        name.push_str(&tokens[index].text);
        // arguments split on top-level commas
        args = vec![Vec::new(); params.len()];
        let mut count = 0usize;
        let mut depth = 0i32;
        index += 1;
        while index < tokens.len() {
            let token2 = &tokens[index];
            name.push_str(&token2.spacing);
            name.push_str(&token2.text);
            if depth == 0 && token2.is_char(')') {
                break;
            } else if depth == 0 && token2.is_char(',') {
                count += 1;
                index += 1;
                continue;
            } else if token2.is_char('(') || token2.is_char('[') || token2.is_char('{') {
                depth += 1;
            } else if token2.is_char(')') || token2.is_char(']') || token2.is_char('}') {
                depth -= 1;
            }
            if count < args.len() {
                args[count].push(token2.clone());
            }
            index += 1;
        }
    }
    let start_token = out.len();
    // the full invocation text may carry its own entry asking us to drop it
    let skip = table.first(&name).map_or(false, |i| i.skip);
    while !skip && !token.is_empty() {
        let mut found_arg = false;
        for (i, param) in params.iter().enumerate() {
            if *param == token.text {
                out.extend(args[i].iter().cloned());
                found_arg = true;
                break;
            }
        }
        if !found_arg {
            out.push(token);
        }
        token = body.next();
    }
    // token pasting
    let mut k = start_token;
    while k < out.len() {
        if out[k].text_is("##") && k > 0 && k + 1 < out.len() {
            let pasted = out[k + 1].text.clone();
            out[k - 1].text.push_str(&pasted);
            out.remove(k);
            out.remove(k);
        }
        k += 1;
    }
    if index < tokens.len() {
        out.extend_from_slice(&tokens[index + 1..]);
    }
    if !skip && start_token < out.len() {
        out[start_token].spacing = tokens[start_index].spacing.clone();
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cxx::info::Info;

    fn expand(source: &str, table: &InfoTable, index: usize) -> Option<Vec<Token>> {
        let tokens = Tokenizer::new(source).tokenize();
        expand_macro(&tokens, index, table)
    }

    fn texts(tokens: &[Token]) -> Vec<String> {
        tokens.iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn object_like_macro_substitutes_its_body() {
        let mut table = InfoTable::new();
        table.put(Info::new(&["MAX"]).cpp_text("#define MAX 1024"));
        let out = expand("int a[MAX];", &table, 3).unwrap();
        assert_eq!(texts(&out), vec!["int", "a", "[", "1024", "]", ";"]);
    }

    #[test]
    fn expansion_inherits_the_invocation_spacing() {
        let mut table = InfoTable::new();
        table.put(Info::new(&["MAX"]).cpp_text("#define MAX 1024"));
        let out = expand("int a =  MAX;", &table, 3).unwrap();
        assert_eq!(out[3].text, "1024");
        assert_eq!(out[3].spacing, "  ");
    }

    #[test]
    fn function_like_macro_substitutes_arguments() {
        let mut table = InfoTable::new();
        table.put(Info::new(&["SQ"]).cpp_text("#define SQ(x) ((x) * (x))"));
        let out = expand("int a = SQ(n + 1);", &table, 3).unwrap();
        assert_eq!(
            texts(&out),
            vec!["int", "a", "=", "(", "(", "n", "+", "1", ")", "*", "(", "n", "+", "1", ")", ")", ";"]
        );
    }

    #[test]
    fn arguments_split_on_top_level_commas_only() {
        let mut table = InfoTable::new();
        table.put(Info::new(&["PAIR"]).cpp_text("#define PAIR(a, b) a; b"));
        let out = expand("PAIR(f(x, y), z)", &table, 0).unwrap();
        assert_eq!(texts(&out), vec!["f", "(", "x", ",", "y", ")", ";", "z"]);
    }

    #[test]
    fn bare_identifier_of_function_like_macro_is_left_alone() {
        let mut table = InfoTable::new();
        table.put(Info::new(&["SQ"]).cpp_text("#define SQ(x) ((x) * (x))"));
        assert!(expand("int SQ;", &table, 1).is_none());
    }

    #[test]
    fn token_pasting_joins_neighbors() {
        let mut table = InfoTable::new();
        table.put(Info::new(&["GLUE"]).cpp_text("#define GLUE(a, b) a ## b"));
        let out = expand("GLUE(foo, bar)", &table, 0).unwrap();
        assert_eq!(texts(&out), vec!["foobar"]);
    }

    #[test]
    fn skipped_invocation_disappears() {
        let mut table = InfoTable::new();
        table.put(Info::new(&["DEPRECATED"]).cpp_text("#define DEPRECATED(x) x"));
        table.put(Info::new(&["DEPRECATED(void f())"]).skip(true));
        let out = expand("DEPRECATED(void f()) int a;", &table, 0).unwrap();
        assert_eq!(texts(&out), vec!["int", "a", ";"]);
    }

    #[test]
    fn entry_without_stored_text_is_not_a_macro() {
        let mut table = InfoTable::new();
        table.put(Info::new(&["size_t"]));
        assert!(expand("size_t n;", &table, 0).is_none());
    }

    #[test]
    fn stored_text_must_define_the_same_name() {
        let mut table = InfoTable::new();
        table.put(Info::new(&["A"]).cpp_text("#define B 1"));
        assert!(expand("A x;", &table, 0).is_none());
    }

    #[test]
    fn unknown_identifier_is_not_a_macro() {
        let table = InfoTable::new();
        assert!(expand("int a;", &table, 0).is_none());
    }
}
