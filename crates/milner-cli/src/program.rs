//! A program as handed to the command line: the tree of each top-level expression and,
//! optionally, the source text the tree was produced from so errors can point into it.

use itertools::Itertools;
use milner_checker::{context::Ctx, typecheck};
use milner_error::Error;
use milner_tree::r#abstract::Expr;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Program {
    /// `{ "source": "...", "body": [...] }`, the shape of an ESTree program.
    Annotated {
        #[serde(default)]
        source: Option<String>,
        body: Vec<Expr>,
    },
    /// A bare array of top-level expressions.
    Bare(Vec<Expr>),
}

impl Program {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn body(&self) -> &[Expr] {
        match self {
            Self::Annotated { body, .. } | Self::Bare(body) => body,
        }
    }

    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Annotated { source, .. } => source.as_deref(),
            Self::Bare(_) => None,
        }
    }

    /// Checks the program and renders one `expression : type` line per top-level expression.
    pub fn check(&self, ctx: &mut Ctx) -> Result<String, Error> {
        let types = typecheck(self.body(), ctx)?;

        Ok(self
            .body()
            .iter()
            .zip(types)
            .map(|(expr, typ)| format!("{expr} : {typ}"))
            .join("\n"))
    }

    /// Renders an error of this program, pointing into the source when there is one.
    pub fn render_error(&self, err: &Error, file_name: &str) -> String {
        match self.source() {
            Some(code) => err.with_code(code, file_name).to_string(),
            None => format!("[error]: {err} ({file_name}, {})", err.location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milner_checker::prelude;

    const PROGRAM: &str = r#"{
        "source": "fun id x = x\nid 200\nid y",
        "body": [
            { "type": "FunctionDeclaration", "name": "id", "location": [0, 12],
              "params": [{ "name": "x" }],
              "body": { "type": "Identifier", "name": "x", "location": [11, 12] } },
            { "type": "CallExpression", "location": [13, 19],
              "callee": { "type": "Identifier", "name": "id", "location": [13, 15] },
              "arguments": [{ "type": "Literal", "value": 200, "location": [16, 19] }] }
        ]
    }"#;

    #[test]
    fn checks_every_top_level_expression() {
        let program = Program::from_json(PROGRAM).unwrap();
        let output = program.check(&mut Ctx::new()).unwrap();

        assert_eq!(output, "(fun id x = x) : (a -> a)\n(id 200) : Number");
    }

    #[test]
    fn accepts_bare_arrays() {
        let program = Program::from_json(
            r#"[{ "type": "CallExpression",
                  "callee": { "type": "Identifier", "name": "length" },
                  "arguments": [{ "type": "Literal", "value": "four" }] }]"#,
        )
        .unwrap();

        assert!(program.source().is_none());
        assert_eq!(
            program.check(&mut prelude::context()).unwrap(),
            "(length \"four\") : Number"
        );
    }

    #[test]
    fn errors_point_into_the_source() {
        let program = Program::from_json(
            r#"{
                "source": "id y",
                "body": [{ "type": "Identifier", "name": "y", "location": [3, 4] }]
            }"#,
        )
        .unwrap();

        let err = program.check(&mut Ctx::new()).unwrap_err();
        let rendered = program.render_error(&err, "main.ml");

        assert!(rendered.contains("undefined symbol 'y'"));
        assert!(rendered.contains("main.ml:1:4"));
    }
}
