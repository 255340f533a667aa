// tests/parser_tests.rs

use bindexpr::ast::{AstFactory, BinOp, Expr, Literal, Number, TreeAstFactory, UnaryOp};
use bindexpr::lexer::Lexer;
use bindexpr::parser::{ParseError, Parser, parse};

fn tree(input: &str) -> Expr {
    parse(input, &TreeAstFactory).unwrap_or_else(|e| panic!("Failed to parse {input:?}: {e}"))
}

fn num(text: &str) -> Expr {
    Expr::Literal(Literal::Number(Number::from_digits(text)))
}

fn id(name: &str) -> Expr {
    Expr::Identifier(name.to_string())
}

fn bin(left: Expr, op: BinOp, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn syntax_error(input: &str) -> bindexpr::SyntaxError {
    match parse(input, &TreeAstFactory) {
        Err(ParseError::Syntax(e)) => e,
        other => panic!("Expected syntax error for {input:?}, got {other:?}"),
    }
}

// ============================================================================
// Simple tests
// ============================================================================

#[test]
fn test_empty_input() {
    assert_eq!(tree(""), Expr::Empty);
    assert_eq!(tree("   "), Expr::Empty);
}

#[test]
fn test_parser_with_explicit_lexer() {
    let lexer = Lexer::new("price > 100");
    let mut parser = Parser::new(lexer, &TreeAstFactory).unwrap();
    let expr = parser.parse().unwrap();

    assert!(matches!(
        expr,
        Expr::Binary {
            op: BinOp::GreaterThan,
            ..
        }
    ));
}

#[test]
fn test_arithmetic() {
    // Should be: Add(1, Multiply(2, 3))
    assert_eq!(
        tree("1 + 2 * 3"),
        bin(num("1"), BinOp::Add, bin(num("2"), BinOp::Multiply, num("3")))
    );
}

#[test]
fn test_parentheses_are_kept() {
    match tree("(1 + 2) * 3") {
        Expr::Binary {
            op: BinOp::Multiply,
            left,
            right,
        } => {
            assert_eq!(
                *left,
                Expr::Paren(Box::new(bin(num("1"), BinOp::Add, num("2"))))
            );
            assert_eq!(*right, num("3"));
        }
        other => panic!("Expected multiplication, got {:?}", other),
    }
}

// ============================================================================
// Literals and Primitives
// ============================================================================

#[test]
fn test_parse_number() {
    assert_eq!(tree("42"), num("42"));
    assert_eq!(tree("3.15"), num("3.15"));
}

#[test]
fn test_parse_string() {
    assert_eq!(
        tree(r#""hello world""#),
        Expr::Literal(Literal::String("hello world".into()))
    );
    assert_eq!(
        tree("'hello world'"),
        Expr::Literal(Literal::String("hello world".into()))
    );
}

#[test]
fn test_parse_keyword_literals() {
    assert_eq!(tree("true"), Expr::Literal(Literal::Boolean(true)));
    assert_eq!(tree("false"), Expr::Literal(Literal::Boolean(false)));
    assert_eq!(tree("null"), Expr::Literal(Literal::Null));
}

#[test]
fn test_parse_this() {
    assert_eq!(tree("this"), id("this"));
}

// ============================================================================
// Precedence and Associativity
// ============================================================================

#[test]
fn test_left_associative_subtraction() {
    assert_eq!(
        tree("a - b - c"),
        bin(bin(id("a"), BinOp::Subtract, id("b")), BinOp::Subtract, id("c"))
    );
}

#[test]
fn test_pipe_is_lowest_binary() {
    assert_eq!(
        tree("a + b | f"),
        bin(bin(id("a"), BinOp::Add, id("b")), BinOp::Pipe, id("f"))
    );
    assert_eq!(
        tree("a || b | f"),
        bin(bin(id("a"), BinOp::Or, id("b")), BinOp::Pipe, id("f"))
    );
}

#[test]
fn test_pipe_chain_is_left_associative() {
    assert_eq!(
        tree("a | f | g"),
        bin(bin(id("a"), BinOp::Pipe, id("f")), BinOp::Pipe, id("g"))
    );
}

#[test]
fn test_logical_bands() {
    assert_eq!(
        tree("a || b && c"),
        bin(id("a"), BinOp::Or, bin(id("b"), BinOp::And, id("c")))
    );
}

#[test]
fn test_equality_below_relational() {
    assert_eq!(
        tree("a == b < c"),
        bin(id("a"), BinOp::Equal, bin(id("b"), BinOp::LessThan, id("c")))
    );
    assert_eq!(
        tree("a != b >= c"),
        bin(id("a"), BinOp::NotEqual, bin(id("b"), BinOp::GreaterEqual, id("c")))
    );
}

#[test]
fn test_relational_chain_is_left_associative() {
    assert_eq!(
        tree("a < b <= c"),
        bin(bin(id("a"), BinOp::LessThan, id("b")), BinOp::LessEqual, id("c"))
    );
}

#[test]
fn test_modulo_and_division() {
    assert_eq!(
        tree("a % b / c + d"),
        bin(
            bin(bin(id("a"), BinOp::Modulo, id("b")), BinOp::Divide, id("c")),
            BinOp::Add,
            id("d")
        )
    );
}

#[test]
fn test_unary_binds_tighter_than_additive() {
    assert_eq!(
        tree("1 + -1"),
        bin(
            num("1"),
            BinOp::Add,
            Expr::Unary {
                op: UnaryOp::Negate,
                operand: Box::new(num("1")),
            }
        )
    );
}

#[test]
fn test_nested_unary() {
    assert_eq!(
        tree("!!+a"),
        Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(Expr::Unary {
                    op: UnaryOp::Plus,
                    operand: Box::new(id("a")),
                }),
            }),
        }
    );
}

#[test]
fn test_unary_applies_to_postfix_chain() {
    assert_eq!(
        tree("-a.b"),
        Expr::Unary {
            op: UnaryOp::Negate,
            operand: Box::new(Expr::Getter {
                receiver: Box::new(id("a")),
                name: "b".into(),
            }),
        }
    );
}

// ============================================================================
// Ternary
// ============================================================================

#[test]
fn test_ternary() {
    assert_eq!(
        tree("a ? true : false"),
        Expr::Ternary {
            condition: Box::new(id("a")),
            true_expr: Box::new(Expr::Literal(Literal::Boolean(true))),
            false_expr: Box::new(Expr::Literal(Literal::Boolean(false))),
        }
    );
}

#[test]
fn test_ternary_is_right_associative() {
    assert_eq!(
        tree("a ? b : c ? d : e"),
        Expr::Ternary {
            condition: Box::new(id("a")),
            true_expr: Box::new(id("b")),
            false_expr: Box::new(Expr::Ternary {
                condition: Box::new(id("c")),
                true_expr: Box::new(id("d")),
                false_expr: Box::new(id("e")),
            }),
        }
    );
}

#[test]
fn test_ternary_binds_looser_than_pipe() {
    match tree("a | f ? 1 : 2") {
        Expr::Ternary { condition, .. } => {
            assert_eq!(*condition, bin(id("a"), BinOp::Pipe, id("f")));
        }
        other => panic!("Expected ternary, got {:?}", other),
    }
}

// ============================================================================
// Postfix: getters, calls, indexing
// ============================================================================

#[test]
fn test_getter_chain() {
    assert_eq!(
        tree("a.b.c"),
        Expr::Getter {
            receiver: Box::new(Expr::Getter {
                receiver: Box::new(id("a")),
                name: "b".into(),
            }),
            name: "c".into(),
        }
    );
}

#[test]
fn test_method_call() {
    assert_eq!(
        tree("a.b()"),
        Expr::Invoke {
            receiver: Box::new(id("a")),
            method: Some("b".into()),
            arguments: Some(vec![]),
        }
    );
}

#[test]
fn test_bare_call() {
    assert_eq!(
        tree("f(1, x)"),
        Expr::Invoke {
            receiver: Box::new(id("f")),
            method: None,
            arguments: Some(vec![num("1"), id("x")]),
        }
    );
}

#[test]
fn test_index() {
    assert_eq!(
        tree("this[\"foo\"]"),
        Expr::Index {
            receiver: Box::new(id("this")),
            argument: Box::new(Expr::Literal(Literal::String("foo".into()))),
        }
    );
}

#[test]
fn test_mixed_postfix_chain() {
    // ((a.b(c))[d]).e
    let expected = Expr::Getter {
        receiver: Box::new(Expr::Index {
            receiver: Box::new(Expr::Invoke {
                receiver: Box::new(id("a")),
                method: Some("b".into()),
                arguments: Some(vec![id("c")]),
            }),
            argument: Box::new(id("d")),
        }),
        name: "e".into(),
    };
    assert_eq!(tree("a.b(c)[d].e"), expected);
}

#[test]
fn test_call_result_is_callable() {
    assert_eq!(
        tree("f()()"),
        Expr::Invoke {
            receiver: Box::new(Expr::Invoke {
                receiver: Box::new(id("f")),
                method: None,
                arguments: Some(vec![]),
            }),
            method: None,
            arguments: Some(vec![]),
        }
    );
}

// ============================================================================
// Map and List Literals
// ============================================================================

#[test]
fn test_empty_collections() {
    assert_eq!(tree("{}"), Expr::Map(vec![]));
    assert_eq!(tree("[]"), Expr::List(vec![]));
}

#[test]
fn test_map_keys_keep_order() {
    assert_eq!(
        tree(r#"{"z": b, c: 1, 'a': d}"#),
        Expr::Map(vec![
            ("z".into(), Some(id("b"))),
            ("c".into(), Some(num("1"))),
            ("a".into(), Some(id("d"))),
        ])
    );
}

#[test]
fn test_map_key_without_value() {
    assert_eq!(
        tree("{a, b: 1}"),
        Expr::Map(vec![("a".into(), None), ("b".into(), Some(num("1")))])
    );
}

#[test]
fn test_map_extra_commas_are_skipped() {
    assert_eq!(
        tree("{a: 1,, b: 2,}"),
        Expr::Map(vec![("a".into(), Some(num("1"))), ("b".into(), Some(num("2")))])
    );
}

#[test]
fn test_list_items() {
    assert_eq!(
        tree("[1, a, 'x']"),
        Expr::List(vec![
            Some(num("1")),
            Some(id("a")),
            Some(Expr::Literal(Literal::String("x".into()))),
        ])
    );
}

#[test]
fn test_list_holes() {
    assert_eq!(
        tree("[1,,3]"),
        Expr::List(vec![Some(num("1")), None, Some(num("3"))])
    );
    assert_eq!(tree("[,1]"), Expr::List(vec![None, Some(num("1"))]));
    assert_eq!(tree("[,]"), Expr::List(vec![None]));
}

#[test]
fn test_list_trailing_comma() {
    assert_eq!(
        tree("[1, 2,]"),
        Expr::List(vec![Some(num("1")), Some(num("2"))])
    );
}

#[test]
fn test_nested_collections() {
    assert_eq!(
        tree("{list: [x], map: {}}"),
        Expr::Map(vec![
            ("list".into(), Some(Expr::List(vec![Some(id("x"))]))),
            ("map".into(), Some(Expr::Map(vec![]))),
        ])
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_trailing_operator() {
    let err = syntax_error("1 +");
    assert_eq!(err.found, "end of input");
    assert_eq!(err.position.column, 4);
    assert!(err.expected.contains(&"number"));
    assert!(err.to_string().starts_with("Unexpected end of input at line 1, column 4"));
}

#[test]
fn test_unbalanced_paren() {
    let err = syntax_error("(1 + 2");
    assert_eq!(err.expected, vec!["`)`"]);

    let err = syntax_error("1 + 2)");
    assert_eq!(err.found, "`)`");
    assert_eq!(err.expected, vec!["end of input"]);
}

#[test]
fn test_unbalanced_brackets() {
    let err = syntax_error("a[1");
    assert_eq!(err.expected, vec!["`]`"]);

    let err = syntax_error("[1 2]");
    assert_eq!(err.found, "number `2`");
    assert_eq!(err.expected, vec!["`,`", "`]`"]);
}

#[test]
fn test_malformed_arguments() {
    let err = syntax_error("f(1 2)");
    assert_eq!(err.expected, vec!["`,`", "`)`"]);
    assert_eq!(err.position.offset, 4);

    let err = syntax_error("f(1,)");
    assert_eq!(err.found, "`)`");
}

#[test]
fn test_missing_name_after_dot() {
    let err = syntax_error("a.(b)");
    assert_eq!(err.expected, vec!["identifier"]);
    assert_eq!(err.found, "`(`");
}

#[test]
fn test_bad_map_key() {
    let err = syntax_error("{1: 2}");
    assert_eq!(err.found, "number `1`");

    let err = syntax_error("{a: 1 b: 2}");
    assert_eq!(err.found, "identifier `b`");
}

#[test]
fn test_ternary_missing_colon() {
    let err = syntax_error("a ? b");
    assert_eq!(err.expected, vec!["`:`"]);
}

#[test]
fn test_lex_error_propagates() {
    match parse("a + 'oops", &TreeAstFactory) {
        Err(ParseError::Lex(e)) => assert_eq!(e.position().offset, 4),
        other => panic!("Expected lex error, got {:?}", other),
    }
}

#[test]
fn test_lex_error_in_first_token() {
    let result = Parser::new(Lexer::new("#"), &TreeAstFactory);
    assert!(matches!(result, Err(ParseError::Lex(_))));
}

#[test]
fn test_unexpected_token_where_operand_expected() {
    let err = syntax_error("a + )");
    assert_eq!(err.found, "`)`");
    assert_eq!(err.position.offset, 4);
    assert!(err.expected.contains(&"identifier"));

    let err = syntax_error("* 2");
    assert_eq!(err.found, "`*`");
    assert_eq!(err.position.offset, 0);

    let err = syntax_error("[a, :]");
    assert_eq!(err.found, "`:`");
    assert!(err.to_string().starts_with("Unexpected `:` at line 1, column 5, expected number"));
}

// ============================================================================
// Nesting limit
// ============================================================================

fn nesting_error(input: &str) -> (usize, usize) {
    match parse(input, &TreeAstFactory) {
        Err(ParseError::RecursionLimit { limit, position }) => (limit, position.offset),
        other => panic!("Expected nesting limit error, got {other:?}"),
    }
}

#[test]
fn test_deeply_nested_parens_fail_cleanly() {
    let source = format!("{}a{}", "(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(nesting_error(&source), (bindexpr::DEFAULT_RECURSION_LIMIT, 64));

    let err = parse(&source, &TreeAstFactory).unwrap_err();
    assert_eq!(err.to_string(), "Exceeded nesting limit of 64 at line 1, column 65");
    assert_eq!(err.position().column, 65);
}

#[test]
fn test_deeply_nested_collections_fail_cleanly() {
    nesting_error(&"[".repeat(10_000));
    nesting_error(&"{a: ".repeat(10_000));
    nesting_error(&format!("{}1", "-".repeat(10_000)));
    nesting_error(&format!("{}c", "a ? b : ".repeat(10_000)));
}

#[test]
fn test_long_chains_fail_cleanly() {
    nesting_error(&format!("a{}", ".b".repeat(10_000)));
    nesting_error(&format!("a{}", "[0]".repeat(10_000)));
    nesting_error(&format!("f{}", "()".repeat(10_000)));
    nesting_error(&format!("a{}", " + a".repeat(10_000)));
    nesting_error(&format!("a{}", " | f".repeat(10_000)));
}

#[test]
fn test_custom_recursion_limit() {
    let parse_with_limit = |source: &str, limit: usize| {
        Parser::new(Lexer::new(source), &TreeAstFactory)
            .unwrap()
            .with_recursion_limit(limit)
            .parse()
    };

    assert!(parse_with_limit("[(a)]", 2).is_ok());
    assert!(parse_with_limit("[(a), (b), (c)]", 2).is_ok());
    assert!(parse_with_limit("a.b.c", 2).is_ok());
    assert!(parse_with_limit("a + b + c", 2).is_ok());

    assert_eq!(
        parse_with_limit("[((a))]", 2),
        Err(ParseError::RecursionLimit {
            limit: 2,
            position: bindexpr::Position {
                offset: 2,
                line: 1,
                column: 3
            },
        })
    );
    assert!(matches!(
        parse_with_limit("a.b.c.d", 2),
        Err(ParseError::RecursionLimit { limit: 2, .. })
    ));
    assert!(matches!(
        parse_with_limit("a + b + c + d", 2),
        Err(ParseError::RecursionLimit { limit: 2, .. })
    ));
}

#[test]
fn test_without_recursion_limit() {
    let source = format!("{}a{}", "(".repeat(80), ")".repeat(80));
    assert!(matches!(
        parse(&source, &TreeAstFactory),
        Err(ParseError::RecursionLimit { .. })
    ));

    let expr = Parser::new(Lexer::new(&source), &TreeAstFactory)
        .unwrap()
        .without_recursion_limit()
        .parse()
        .unwrap();
    assert!(matches!(expr, Expr::Paren(_)));
}

#[test]
fn test_moderate_nesting_is_accepted() {
    let source = format!("{}a{}", "(".repeat(60), ")".repeat(60));
    assert!(parse(&source, &TreeAstFactory).is_ok());
    assert!(parse(&format!("a{}", ".b".repeat(60)), &TreeAstFactory).is_ok());
}

// ============================================================================
// Custom factories
// ============================================================================

/// Counts nodes instead of building a tree.
struct NodeCounter;

impl AstFactory for NodeCounter {
    type Node = usize;

    fn empty(&self) -> usize {
        1
    }

    fn literal(&self, _value: Literal) -> usize {
        1
    }

    fn identifier(&self, _name: String) -> usize {
        1
    }

    fn unary(&self, _op: UnaryOp, operand: usize) -> usize {
        operand + 1
    }

    fn binary(&self, left: usize, _op: BinOp, right: usize) -> usize {
        left + right + 1
    }

    fn getter(&self, receiver: usize, _name: String) -> usize {
        receiver + 1
    }

    fn invoke(&self, receiver: usize, _method: Option<String>, arguments: Option<Vec<usize>>) -> usize {
        receiver + arguments.into_iter().flatten().sum::<usize>() + 1
    }

    fn paren(&self, child: usize) -> usize {
        child + 1
    }

    fn index(&self, receiver: usize, argument: usize) -> usize {
        receiver + argument + 1
    }

    fn ternary(&self, condition: usize, true_expr: usize, false_expr: usize) -> usize {
        condition + true_expr + false_expr + 1
    }

    fn map(&self, entries: Vec<(String, Option<usize>)>) -> usize {
        entries.into_iter().filter_map(|(_, v)| v).sum::<usize>() + 1
    }

    fn list(&self, items: Vec<Option<usize>>) -> usize {
        items.into_iter().flatten().sum::<usize>() + 1
    }
}

#[test]
fn test_parser_drives_any_factory() {
    assert_eq!(parse("", &NodeCounter).unwrap(), 1);
    assert_eq!(parse("a.b(c, 1) | f", &NodeCounter).unwrap(), 6);
    assert_eq!(parse("[x, , {k: (y)}]", &NodeCounter).unwrap(), 5);
}
