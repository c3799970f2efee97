//! Parser for the schematic DSL.

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{CircuitSimError, Result};

/// Parser for schematic DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            current: Token {
                kind: TokenKind::Newline,
                text: String::new(),
                line: 1,
                column: 1,
            },
        }
    }

    /// Parse the entire schematic description.
    pub fn parse(&mut self) -> Result<SchematicAst> {
        let mut ast = SchematicAst::new();
        self.advance()?;

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            match &self.current.kind {
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => self.parse_statement(&mut ast)?,
                _ => {
                    return Err(CircuitSimError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            self.end_of_line()?;
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(CircuitSimError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn at_line_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof)
    }

    fn end_of_line(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(CircuitSimError::parse(
                self.current.line,
                format!("unexpected trailing token: {:?}", self.current.text),
            )),
        }
    }

    fn parse_directive(&mut self, ast: &mut SchematicAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;

        // The lexer sits just past the directive name, so the title is read raw.
        if directive.eq_ignore_ascii_case(".title") {
            let title = self.lexer.rest_of_line();
            self.advance()?;
            ast.title = Some(title).filter(|t| !t.is_empty());
            return Ok(());
        }
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".wire" => {
                let terminals = self.parse_terminal_refs(line)?;
                ast.wires.push(WireDef {
                    name: None,
                    terminals,
                    line,
                });
            }
            _ => {
                return Err(CircuitSimError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_statement(&mut self, ast: &mut SchematicAst) -> Result<()> {
        let name = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let prefix = name.chars().next().unwrap_or('?');
        if prefix.eq_ignore_ascii_case(&'W') {
            let terminals = self.parse_terminal_refs(line)?;
            ast.wires.push(WireDef {
                name: Some(name),
                terminals,
                line,
            });
            return Ok(());
        }

        let component_type =
            ComponentType::from_prefix(prefix).ok_or_else(|| CircuitSimError::UnknownComponentType {
                component_type: name.clone(),
                line,
            })?;

        let mut value = None;
        let mut label = None;

        while !self.at_line_end() {
            match (&self.current.kind, component_type) {
                (TokenKind::Number, ComponentType::Resistor | ComponentType::VoltageSource)
                    if value.is_none() =>
                {
                    let v = parse_value(&self.current.text).ok_or_else(|| {
                        CircuitSimError::invalid_component(
                            &name,
                            line,
                            format!("invalid value '{}'", self.current.text),
                        )
                    })?;
                    value = Some(v);
                }
                (TokenKind::Identifier, ComponentType::Device) if label.is_none() => {
                    label = Some(self.current.text.clone());
                }
                _ => {
                    return Err(CircuitSimError::invalid_component(
                        &name,
                        line,
                        format!("unexpected argument '{}'", self.current.text),
                    ));
                }
            }
            self.advance()?;
        }

        ast.components.push(ComponentDef {
            component_type,
            name,
            value,
            label,
            line,
        });
        Ok(())
    }

    fn parse_terminal_refs(&mut self, line: usize) -> Result<Vec<TerminalRef>> {
        let mut terminals = Vec::new();
        while !self.at_line_end() {
            let component = self.expect(TokenKind::Identifier)?.text;
            self.expect(TokenKind::Colon)?;
            let terminal = self.expect(TokenKind::Identifier)?.text;
            terminals.push(TerminalRef {
                component,
                terminal,
            });
        }

        if terminals.len() < 2 {
            return Err(CircuitSimError::parse(
                line,
                format!("a wire needs at least two terminals, got {}", terminals.len()),
            ));
        }
        Ok(terminals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resistor() {
        let ast = super::super::parse("R1 10k").unwrap();
        assert_eq!(ast.components.len(), 1);
        assert_eq!(ast.components[0].component_type, ComponentType::Resistor);
        assert_eq!(ast.components[0].name, "R1");
        assert_eq!(ast.components[0].value, Some(10_000.0));
    }

    #[test]
    fn test_parse_source_and_device() {
        let ast = super::super::parse("V1 9\nVBAT\nX1 lamp").unwrap();
        assert_eq!(ast.components[0].value, Some(9.0));
        assert_eq!(ast.components[1].value, None);
        assert_eq!(ast.components[2].component_type, ComponentType::Device);
        assert_eq!(ast.components[2].label.as_deref(), Some("lamp"));
    }

    #[test]
    fn test_parse_wires() {
        let input = "W1 V1:pos R1:a R2:a\n.wire R1:b V1:neg";
        let ast = super::super::parse(input).unwrap();
        assert_eq!(ast.wires.len(), 2);
        assert_eq!(ast.wires[0].name.as_deref(), Some("W1"));
        assert_eq!(
            ast.wires[0].terminals,
            vec![
                TerminalRef::new("V1", "pos"),
                TerminalRef::new("R1", "a"),
                TerminalRef::new("R2", "a"),
            ]
        );
        assert_eq!(ast.wires[1].name, None);
        assert_eq!(ast.wires[1].line, 2);
    }

    #[test]
    fn test_parse_title() {
        let ast = super::super::parse(".title Voltage divider 2\nR1 1k").unwrap();
        assert_eq!(ast.title.as_deref(), Some("Voltage divider 2"));
    }

    #[test]
    fn test_title_keeps_punctuation() {
        let ast = super::super::parse(".title Series-parallel\nR1 1k").unwrap();
        assert_eq!(ast.title.as_deref(), Some("Series-parallel"));

        let ast = super::super::parse(".title Divider v1.2").unwrap();
        assert_eq!(ast.title.as_deref(), Some("Divider v1.2"));

        let ast = super::super::parse(".TITLE  Bob's lamp (9V)  \nV1 9\n").unwrap();
        assert_eq!(ast.title.as_deref(), Some("Bob's lamp (9V)"));
        assert_eq!(ast.components.len(), 1);
        assert_eq!(ast.components[0].line, 2);
    }

    #[test]
    fn test_empty_title_is_none() {
        let ast = super::super::parse(".title\nR1 1k").unwrap();
        assert_eq!(ast.title, None);
        assert_eq!(ast.components.len(), 1);
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "# This is a comment\nR1 1k ; inline comment style\n";
        let ast = super::super::parse(input).unwrap();
        assert_eq!(ast.components.len(), 1);
    }

    #[test]
    fn test_wire_with_one_terminal_rejected() {
        let err = super::super::parse("R1 1k\nW1 R1:a").unwrap_err();
        assert!(matches!(err, CircuitSimError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_unknown_component_type() {
        let err = super::super::parse("C1 100n").unwrap_err();
        assert!(matches!(
            err,
            CircuitSimError::UnknownComponentType { line: 1, .. }
        ));
    }

    #[test]
    fn test_resistor_extra_argument_rejected() {
        let err = super::super::parse("R1 1k 2k").unwrap_err();
        assert!(matches!(err, CircuitSimError::InvalidComponent { .. }));
    }
}
