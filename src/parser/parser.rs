use crate::ast::*;
use crate::lexer::{Token, TokenKind, Tokens};

use super::error::{ParseError, ParseResult};

/// Recursive-descent parser with a single token of lookahead, operating
/// over the `Tokens<Token>` cursor.
pub struct Parser {
    tokens: Tokens<Token>,
}

/// Parse a full token stream (already terminated with `Eof`) into an
/// ordered list of top-level statements.
pub fn parse(tokens: Vec<Token>) -> ParseResult<Program> {
    Parser::new(tokens).parse_program()
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: Tokens::new(tokens),
        }
    }

    fn peek(&self) -> Token {
        self.tokens
            .peek()
            .expect("token stream must end with Eof")
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    fn line(&self) -> usize {
        self.peek().line
    }

    fn advance(&mut self) -> Token {
        self.tokens.next().expect("token stream must end with Eof")
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.peek_kind() == kind
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::new(
                format!(
                    "expected {} but found {}",
                    kind.describe(),
                    self.peek_kind().describe()
                ),
                self.line(),
            ))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<(String, usize)> {
        let line = self.line();
        match self.peek_kind() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok((name, line))
            }
            other => Err(ParseError::new(
                format!("expected identifier but found {}", other.describe()),
                line,
            )),
        }
    }

    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut statements = Vec::new();
        while !self.check(&TokenKind::Eof) {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.peek_kind() {
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Def => self.parse_func_def(),
            TokenKind::Class => self.parse_class_def(),
            _ => {
                let stmt = self.parse_simple_stmt()?;
                self.expect(TokenKind::Newline)?;
                Ok(stmt)
            }
        }
    }

    fn parse_block(&mut self) -> ParseResult<Vec<Stmt>> {
        self.expect(TokenKind::Newline)?;
        self.expect(TokenKind::Indent)?;
        let mut statements = Vec::new();
        while !self.check(&TokenKind::Dedent) {
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::Dedent)?;
        Ok(statements)
    }

    fn parse_simple_stmt(&mut self) -> ParseResult<Stmt> {
        match self.peek_kind() {
            TokenKind::Print => self.parse_print(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => {
                let line = self.advance().line;
                Ok(Stmt::Break(Break { line }))
            }
            TokenKind::Continue => {
                let line = self.advance().line;
                Ok(Stmt::Continue(Continue { line }))
            }
            TokenKind::Pass => {
                let line = self.advance().line;
                Ok(Stmt::Pass(Pass { line }))
            }
            TokenKind::Import => self.parse_import(),
            _ => self.parse_assignment_or_expr_stmt(),
        }
    }

    fn parse_print(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'print'
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            args.push(self.parse_expr()?);
            while self.check(&TokenKind::Comma) {
                self.advance();
                if self.check(&TokenKind::RParen) {
                    break;
                }
                args.push(self.parse_expr()?);
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(Stmt::Print(Print { args, line }))
    }

    fn parse_return(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'return'
        let value = if self.check(&TokenKind::Newline) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        Ok(Stmt::Return(Return { value, line }))
    }

    fn parse_import(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'import'
        let (module, _) = self.expect_ident()?;
        Ok(Stmt::Import(Import { module, line }))
    }

    fn parse_assignment_or_expr_stmt(&mut self) -> ParseResult<Stmt> {
        let line = self.line();
        let expr = self.parse_expr()?;

        if self.check(&TokenKind::Eq) {
            self.advance();
            let target = Self::expr_to_target(expr)?;
            let value = self.parse_expr()?;
            return Ok(Stmt::Assign(Assign { target, value, line }));
        }

        if let Some(op) = BinaryOperator::from_aug_token(&self.peek_kind()) {
            self.advance();
            let target = Self::expr_to_target(expr)?;
            let value = self.parse_expr()?;
            return Ok(Stmt::AugAssign(AugAssign {
                target,
                op,
                value,
                line,
            }));
        }

        Ok(Stmt::Expr(expr))
    }

    fn expr_to_target(expr: Expr) -> ParseResult<AssignTarget> {
        match expr {
            Expr::Ident(Ident { name, line }) => Ok(AssignTarget::Ident { name, line }),
            Expr::Attribute(Attribute { object, name, line }) => {
                Ok(AssignTarget::Attribute { object, name, line })
            }
            Expr::Subscript(Subscript { object, index, line }) => {
                Ok(AssignTarget::Subscript { object, index, line })
            }
            other => Err(ParseError::new(
                "invalid assignment target",
                other.line(),
            )),
        }
    }

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'if'
        let mut branches = Vec::new();

        let test = self.parse_expr()?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_block()?;
        branches.push((test, body));

        while self.check(&TokenKind::Elif) {
            self.advance();
            let test = self.parse_expr()?;
            self.expect(TokenKind::Colon)?;
            let body = self.parse_block()?;
            branches.push((test, body));
        }

        let else_body = if self.check(&TokenKind::Else) {
            self.advance();
            self.expect(TokenKind::Colon)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            branches,
            else_body,
            line,
        }))
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'while'
        let test = self.parse_expr()?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_block()?;
        Ok(Stmt::While(WhileStmt { test, body, line }))
    }

    fn parse_for(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'for'
        let (iter_name, _) = self.expect_ident()?;
        self.expect(TokenKind::In)?;
        let iterable = self.parse_expr()?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_block()?;
        Ok(Stmt::For(ForStmt {
            iter_name,
            iterable,
            body,
            line,
        }))
    }

    fn parse_func_def(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'def'
        let (name, _) = self.expect_ident()?;
        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_block()?;
        Ok(Stmt::FuncDef(FuncDef {
            name,
            params,
            body,
            line,
        }))
    }

    fn parse_params(&mut self) -> ParseResult<Vec<String>> {
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            let (name, _) = self.expect_ident()?;
            params.push(name);
            while self.check(&TokenKind::Comma) {
                self.advance();
                if self.check(&TokenKind::RParen) {
                    break;
                }
                let (name, _) = self.expect_ident()?;
                params.push(name);
            }
        }
        Ok(params)
    }

    fn parse_class_def(&mut self) -> ParseResult<Stmt> {
        let line = self.advance().line; // 'class'
        let (name, _) = self.expect_ident()?;
        let base = if self.check(&TokenKind::LParen) {
            self.advance();
            let (base_name, _) = self.expect_ident()?;
            self.expect(TokenKind::RParen)?;
            Some(base_name)
        } else {
            None
        };
        self.expect(TokenKind::Colon)?;
        let body = self.parse_block()?;
        Ok(Stmt::ClassDef(ClassDef {
            name,
            base,
            body,
            line,
        }))
    }

    // ---- expressions, lowest to highest precedence ----

    fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_or_expr()
    }

    fn parse_or_expr(&mut self) -> ParseResult<Expr> {
        let line = self.line();
        let first = self.parse_and_expr()?;
        if !self.check(&TokenKind::Or) {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.check(&TokenKind::Or) {
            self.advance();
            operands.push(self.parse_and_expr()?);
        }
        Ok(Expr::BoolOp(BoolOp {
            op: BoolOperator::Or,
            operands,
            line,
        }))
    }

    fn parse_and_expr(&mut self) -> ParseResult<Expr> {
        let line = self.line();
        let first = self.parse_not_expr()?;
        if !self.check(&TokenKind::And) {
            return Ok(first);
        }
        let mut operands = vec![first];
        while self.check(&TokenKind::And) {
            self.advance();
            operands.push(self.parse_not_expr()?);
        }
        Ok(Expr::BoolOp(BoolOp {
            op: BoolOperator::And,
            operands,
            line,
        }))
    }

    fn parse_not_expr(&mut self) -> ParseResult<Expr> {
        if self.check(&TokenKind::Not) {
            let line = self.advance().line;
            let operand = Box::new(self.parse_not_expr()?);
            return Ok(Expr::UnaryOp(UnaryOp {
                op: UnaryOperator::Not,
                operand,
                line,
            }));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let line = self.line();
        let first = self.parse_sum()?;
        let mut rest = Vec::new();
        while let Some(op) = CompareOperator::from_token(&self.peek_kind()) {
            self.advance();
            rest.push((op, self.parse_sum()?));
        }
        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Compare(Compare {
                first: Box::new(first),
                rest,
                line,
            }))
        }
    }

    fn parse_sum(&mut self) -> ParseResult<Expr> {
        let line = self.line();
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expr::BinOp(BinOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                line,
            });
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        let line = self.line();
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinaryOperator::Mul,
                TokenKind::Slash => BinaryOperator::Div,
                TokenKind::DoubleSlash => BinaryOperator::FloorDiv,
                TokenKind::Percent => BinaryOperator::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::BinOp(BinOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                line,
            });
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let op = match self.peek_kind() {
            TokenKind::Minus => Some(UnaryOperator::Neg),
            TokenKind::Plus => Some(UnaryOperator::Pos),
            _ => None,
        };
        if let Some(op) = op {
            let line = self.advance().line;
            let operand = Box::new(self.parse_factor()?);
            return Ok(Expr::UnaryOp(UnaryOp { op, operand, line }));
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> ParseResult<Expr> {
        let line = self.line();
        let base = self.parse_atom_trailer()?;
        if self.check(&TokenKind::DoubleStar) {
            self.advance();
            let right = self.parse_factor()?;
            return Ok(Expr::BinOp(BinOp {
                op: BinaryOperator::Pow,
                left: Box::new(base),
                right: Box::new(right),
                line,
            }));
        }
        Ok(base)
    }

    fn parse_atom_trailer(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_atom()?;
        loop {
            match self.peek_kind() {
                TokenKind::LParen => {
                    let line = self.advance().line;
                    let mut args = Vec::new();
                    if !self.check(&TokenKind::RParen) {
                        args.push(self.parse_expr()?);
                        while self.check(&TokenKind::Comma) {
                            self.advance();
                            if self.check(&TokenKind::RParen) {
                                break;
                            }
                            args.push(self.parse_expr()?);
                        }
                    }
                    self.expect(TokenKind::RParen)?;
                    expr = Expr::Call(Call {
                        callee: Box::new(expr),
                        args,
                        line,
                    });
                }
                TokenKind::LBracket => {
                    let line = self.advance().line;
                    let index = self.parse_expr()?;
                    self.expect(TokenKind::RBracket)?;
                    expr = Expr::Subscript(Subscript {
                        object: Box::new(expr),
                        index: Box::new(index),
                        line,
                    });
                }
                TokenKind::Dot => {
                    let line = self.advance().line;
                    let (name, _) = self.expect_ident()?;
                    expr = Expr::Attribute(Attribute {
                        object: Box::new(expr),
                        name,
                        line,
                    });
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_atom(&mut self) -> ParseResult<Expr> {
        let line = self.line();
        match self.peek_kind() {
            TokenKind::Number { text, is_float } => {
                self.advance();
                Ok(Expr::Number(Number {
                    value: text,
                    is_float,
                    line,
                }))
            }
            TokenKind::Str(value) => {
                self.advance();
                Ok(Expr::Str(StrLit { value, line }))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::Bool(BoolLit { value: true, line }))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::Bool(BoolLit { value: false, line }))
            }
            TokenKind::None => {
                self.advance();
                Ok(Expr::None(NoneLit { line }))
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Expr::Ident(Ident { name, line }))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => self.parse_list_lit(),
            TokenKind::LBrace => self.parse_dict_lit(),
            TokenKind::Lambda => self.parse_lambda(),
            other => Err(ParseError::new(
                format!("unexpected token {}", other.describe()),
                line,
            )),
        }
    }

    fn parse_list_lit(&mut self) -> ParseResult<Expr> {
        let line = self.advance().line; // '['
        let mut elements = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            elements.push(self.parse_expr()?);
            while self.check(&TokenKind::Comma) {
                self.advance();
                if self.check(&TokenKind::RBracket) {
                    break;
                }
                elements.push(self.parse_expr()?);
            }
        }
        self.expect(TokenKind::RBracket)?;
        Ok(Expr::List(ListLit { elements, line }))
    }

    fn parse_dict_lit(&mut self) -> ParseResult<Expr> {
        let line = self.advance().line; // '{'
        let mut entries = Vec::new();
        if !self.check(&TokenKind::RBrace) {
            entries.push(self.parse_dict_entry()?);
            while self.check(&TokenKind::Comma) {
                self.advance();
                if self.check(&TokenKind::RBrace) {
                    break;
                }
                entries.push(self.parse_dict_entry()?);
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Expr::Dict(DictLit { entries, line }))
    }

    fn parse_dict_entry(&mut self) -> ParseResult<(Expr, Expr)> {
        let key = self.parse_expr()?;
        self.expect(TokenKind::Colon)?;
        let value = self.parse_expr()?;
        Ok((key, value))
    }

    fn parse_lambda(&mut self) -> ParseResult<Expr> {
        let line = self.advance().line; // 'lambda'
        let mut params = Vec::new();
        if !self.check(&TokenKind::Colon) {
            let (name, _) = self.expect_ident()?;
            params.push(name);
            while self.check(&TokenKind::Comma) {
                self.advance();
                let (name, _) = self.expect_ident()?;
                params.push(name);
            }
        }
        self.expect(TokenKind::Colon)?;
        let body = Box::new(self.parse_expr()?);
        Ok(Expr::Lambda(Lambda { params, body, line }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse_src(src: &str) -> ParseResult<Program> {
        let tokens = Lexer::new(src).lex().expect("lexing must succeed");
        parse(tokens)
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let program = parse_src("1 + 2 * 3\n").unwrap();
        match &program[0] {
            Stmt::Expr(Expr::BinOp(BinOp { op: BinaryOperator::Add, right, .. })) => {
                assert!(matches!(right.as_ref(), Expr::BinOp(BinOp { op: BinaryOperator::Mul, .. })));
            }
            other => panic!("expected a top-level Add BinOp, got {other:?}"),
        }
    }

    #[test]
    fn chained_comparison_collects_every_operator() {
        let program = parse_src("a < b <= c\n").unwrap();
        match &program[0] {
            Stmt::Expr(Expr::Compare(Compare { rest, .. })) => assert_eq!(rest.len(), 2),
            other => panic!("expected a Compare expression, got {other:?}"),
        }
    }

    #[test]
    fn if_elif_else_produces_one_branch_per_clause() {
        let src = "if a:\n    pass\nelif b:\n    pass\nelse:\n    pass\n";
        let program = parse_src(src).unwrap();
        match &program[0] {
            Stmt::If(IfStmt { branches, else_body, .. }) => {
                assert_eq!(branches.len(), 2);
                assert!(else_body.is_some());
            }
            other => panic!("expected an IfStmt, got {other:?}"),
        }
    }

    #[test]
    fn class_with_a_base_records_it_by_name() {
        let program = parse_src("class Dog(Animal):\n    pass\n").unwrap();
        match &program[0] {
            Stmt::ClassDef(ClassDef { base, .. }) => assert_eq!(base.as_deref(), Some("Animal")),
            other => panic!("expected a ClassDef, got {other:?}"),
        }
    }

    #[test]
    fn assigning_to_a_literal_is_a_parse_error() {
        let err = parse_src("1 = 2\n").unwrap_err();
        assert_eq!(err.message, "invalid assignment target");
    }

    #[test]
    fn a_block_missing_its_indent_is_a_parse_error() {
        assert!(parse_src("if a:\npass\n").is_err());
    }

    #[test]
    fn method_call_on_an_attribute_nests_call_around_attribute() {
        let program = parse_src("obj.method(1)\n").unwrap();
        match &program[0] {
            Stmt::Expr(Expr::Call(Call { callee, args, .. })) => {
                assert!(matches!(callee.as_ref(), Expr::Attribute(_)));
                assert_eq!(args.len(), 1);
            }
            other => panic!("expected a Call wrapping an Attribute, got {other:?}"),
        }
    }
}
