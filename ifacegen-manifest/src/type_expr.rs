//! Parsing of type strings such as `map[string][]*store.User`.
//!
//! Supported forms:
//!
//! - `ident` and `import/path.Name` (qualified by everything before the last dot)
//! - `*T`, `[]T`, `[N]T`, `map[K]V`, `...T`, `(T)`
//! - `Name[A, B]` instantiated generics
//! - `func(ctx context.Context, id string) (T, error)` function types
//! - `chan T`, `chan<- T` and `<-chan T`
//! - `interface{...}` and `struct{...}` literals are kept verbatim up to the
//!   next top-level `,`, `)` or `]`

use ifacegen_codegen::{ChanDir, Param, TypeExpr, naming::is_go_keyword};

/// Nesting levels a type string may use before it is rejected.
pub const MAX_DEPTH: usize = 256;

const RAW_KEYWORDS: &[&str] = &["interface", "struct"];

/// Parse a type string into a [`TypeExpr`].
///
/// Returns the reason on failure.
pub fn parse_type(src: &str) -> std::result::Result<TypeExpr, String> {
    let mut parser = TypeParser {
        src,
        pos: 0,
        depth: 0,
    };
    let ty = parser.parse()?;
    parser.skip_ws();
    if parser.pos < src.len() {
        return Err(format!(
            "unexpected '{}' after type at offset {}",
            parser.rest(),
            parser.pos
        ));
    }
    Ok(ty)
}

struct TypeParser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> TypeParser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    /// Like [`Self::eat`], but `kw` must not run on into an identifier.
    fn eat_keyword(&mut self, kw: &str) -> bool {
        self.skip_ws();
        if at_keyword(self.rest(), kw) {
            self.pos += kw.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> std::result::Result<(), String> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(format!("expected '{}' at offset {}", token, self.pos))
        }
    }

    fn parse(&mut self) -> std::result::Result<TypeExpr, String> {
        if self.depth >= MAX_DEPTH {
            return Err(format!("type nests deeper than {} levels", MAX_DEPTH));
        }
        self.depth += 1;
        let ty = self.parse_nested();
        self.depth -= 1;
        ty
    }

    fn parse_nested(&mut self) -> std::result::Result<TypeExpr, String> {
        self.skip_ws();
        if self.rest().is_empty() {
            return Err("type cannot be empty".to_string());
        }

        if self.eat("...") {
            return Ok(TypeExpr::variadic(self.parse()?));
        }
        if self.eat("*") {
            return Ok(TypeExpr::pointer(self.parse()?));
        }
        if self.eat("(") {
            let ty = self.parse()?;
            self.expect(")")?;
            return Ok(ty);
        }
        if self.eat("[") {
            if self.eat("]") {
                return Ok(TypeExpr::slice(self.parse()?));
            }
            let len = self.number()?;
            self.expect("]")?;
            return Ok(TypeExpr::array(len, self.parse()?));
        }
        if self.rest().starts_with("map[") {
            self.pos += "map".len();
            self.expect("[")?;
            let key = self.parse()?;
            self.expect("]")?;
            return Ok(TypeExpr::map(key, self.parse()?));
        }
        if self.eat("<-") {
            if !self.eat_keyword("chan") {
                return Err(format!("expected 'chan' at offset {}", self.pos));
            }
            return Ok(TypeExpr::chan(ChanDir::Recv, self.parse()?));
        }
        if self.eat_keyword("chan") {
            let dir = if self.eat("<-") {
                ChanDir::Send
            } else {
                ChanDir::Both
            };
            return Ok(TypeExpr::chan(dir, self.parse()?));
        }
        if self.eat_keyword("func") {
            return self.func();
        }
        if RAW_KEYWORDS.iter().any(|kw| at_keyword(self.rest(), kw)) {
            return Ok(TypeExpr::raw(self.raw()));
        }

        let base = self.name()?;
        if self.eat("[") {
            let mut args = vec![self.parse()?];
            while self.eat(",") {
                args.push(self.parse()?);
            }
            self.expect("]")?;
            return Ok(TypeExpr::generic(base, args));
        }
        Ok(base)
    }

    /// `(params) results`, after the `func` keyword.
    fn func(&mut self) -> std::result::Result<TypeExpr, String> {
        self.expect("(")?;
        let params = self.param_list()?;
        let results = if self.eat("(") {
            self.param_list()?
        } else if self.at_result() {
            vec![Param::unnamed(self.parse()?)]
        } else {
            Vec::new()
        };
        Ok(TypeExpr::func(params, results))
    }

    /// Whether a single unparenthesised result type follows.
    fn at_result(&mut self) -> bool {
        self.skip_ws();
        !self.rest().is_empty() && !self.rest().starts_with([',', ')', ']'])
    }

    /// Parameters up to and including the closing `)`.
    fn param_list(&mut self) -> std::result::Result<Vec<Param>, String> {
        let mut params = Vec::new();
        if self.eat(")") {
            return Ok(params);
        }
        loop {
            params.push(self.param()?);
            if self.eat(")") {
                break;
            }
            self.expect(",")?;
            if self.eat(")") {
                break;
            }
        }

        let named = params.iter().filter(|p| p.name().is_some()).count();
        if named != 0 && named != params.len() {
            return Err("mixed named and unnamed parameters in func type".to_string());
        }
        Ok(params)
    }

    /// `name Type` or `Type`.
    fn param(&mut self) -> std::result::Result<Param, String> {
        self.skip_ws();
        let rest = self.rest();
        let ident = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let after = &rest[ident..];
        let ty_start = after.trim_start();
        let named = ident > 0
            && ty_start.len() < after.len()
            && !ty_start.is_empty()
            && !ty_start.starts_with([',', ')'])
            && !is_go_keyword(&rest[..ident]);

        if named {
            let name = rest[..ident].to_string();
            self.pos += ident;
            Ok(Param::named(name, self.parse()?))
        } else {
            Ok(Param::unnamed(self.parse()?))
        }
    }

    fn number(&mut self) -> std::result::Result<usize, String> {
        self.skip_ws();
        let digits = self
            .rest()
            .chars()
            .take_while(char::is_ascii_digit)
            .count();
        let text = &self.rest()[..digits];
        let len = text
            .parse()
            .map_err(|_| format!("expected array length at offset {}", self.pos))?;
        self.pos += digits;
        Ok(len)
    }

    fn name(&mut self) -> std::result::Result<TypeExpr, String> {
        self.skip_ws();
        let start = self.pos;
        let len = self
            .rest()
            .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '.' | '/' | '-' | '~')))
            .unwrap_or(self.rest().len());
        if len == 0 {
            return Err(format!("expected type name at offset {}", start));
        }
        let text = &self.rest()[..len];
        self.pos += len;

        match text.rsplit_once('.') {
            None => Ok(TypeExpr::named(text)),
            Some((package, name)) if !package.is_empty() && !name.is_empty() => {
                Ok(TypeExpr::qualified(package, name))
            }
            Some(_) => Err(format!("malformed qualified name '{}'", text)),
        }
    }

    /// Consume up to the next `,`, `)` or `]` that is not nested in brackets.
    fn raw(&mut self) -> String {
        let mut depth = 0usize;
        let mut end = self.rest().len();
        for (i, c) in self.rest().char_indices() {
            match c {
                '(' | '[' | '{' => depth += 1,
                ',' | ')' | ']' if depth == 0 => {
                    end = i;
                    break;
                }
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        let text = self.rest()[..end].trim_end().to_string();
        self.pos += end;
        text
    }
}

fn at_keyword(rest: &str, kw: &str) -> bool {
    rest.strip_prefix(kw)
        .is_some_and(|after| !after.starts_with(|c: char| c.is_alphanumeric() || c == '_'))
}
