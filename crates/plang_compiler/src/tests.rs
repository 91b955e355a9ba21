use plang_session::diagnostics::termcolor::NoColor;
use plang_session::diagnostics::{Config, Diagnostic};
use plang_session::sourcemap::Source;
use plang_session::Session;
use plang_utils::assert_snapshot_with_source;

use crate::cli::Emit;
use crate::compiler::{check_source, Compilation, ErrorCounts};
use crate::{emit_json, CompilerError};

const EXAMPLE: &str = r#"fn main() { let x: int; x = 5; println("{}", x); return x; }"#;

fn check(source: &str) -> (Session<Vec<Diagnostic>>, Compilation, bool) {
    let mut session = Session::new(Vec::<Diagnostic>::new());
    let (result, compilation) = check_source(&mut session, Source::new("main.p", source));

    let ok = match result {
        Ok(()) => true,
        Err(CompilerError::HadErrors) => false,
        Err(err) => panic!("unexpected error: {err}"),
    };

    (session, compilation, ok)
}

fn test_compiles(source: &str, should_compile: bool) {
    let (session, _, compiled) = check(source);

    match (compiled, should_compile) {
        (false, true) => panic!(
            "failed to compile: {source:?}, diagnostics: {:?}",
            session.diagnostics
        ),
        (true, false) => panic!("unexpectedly compiled: {source:?}"),
        _ => {}
    }
}

fn rendered(source: &str) -> String {
    let (session, _, _) = check(source);

    let config = Config::default();
    let mut stream = NoColor::new(vec![]);
    for diagnostic in &session.diagnostics {
        diagnostic
            .write_to_stream(&session.sources, &config, &mut stream)
            .unwrap();
    }

    String::from_utf8(stream.into_inner()).unwrap()
}

#[test]
fn full_function() {
    test_compiles(EXAMPLE, true);
}

#[test]
fn newlines() {
    test_compiles("\nfn\nmain\n(\n)\n{\nreturn\n0\n;\n}", true);
}

#[test]
fn no_newlines() {
    test_compiles("fn main(){return 0;}", true);
}

#[test]
fn several_functions() {
    test_compiles(
        "fn add(a: int, b: int) {
            let sum: int;
            sum = a + b;
            return sum;
        }

        fn main() {
            let f, g: float;
            let c: char;
            let s: string;
            f = 1.5;
            g = f * (f - 0.5) / 2.0;
            c = 'x';
            s = \"done\";
            println(\"{} {}\", g, c);
            println(s);
        }",
        true,
    );
}

#[test]
fn empty_source() {
    test_compiles("", true);
}

#[test]
fn lexical_errors_fail() {
    test_compiles("fn main() { let x: int; x = 1 @ 2; }", false);
    test_compiles("fn main() { println(\"open); }", false);
}

#[test]
fn syntax_errors_fail() {
    test_compiles("fn main() { let x: int x = 1; }", false);
    test_compiles("fn main() { return 0 }", false);
    test_compiles("main() {}", false);
}

#[test]
fn semantic_errors_fail() {
    test_compiles("fn main() { let a: int; a = 3.5; }", false);
    test_compiles("fn main() { y = 1; }", false);
    test_compiles("fn main() { let s: string; s = \"a\" - \"b\"; }", false);
}

#[test]
fn every_stage_reports() {
    let (session, compilation, ok) =
        check("fn main() {\n  let a: int;\n  a = 1 @ 2;\n  a = 2.5;\n  b = 1\n}");

    assert!(!ok);
    assert_eq!(
        compilation.errors.counts(),
        ErrorCounts {
            lexical: 1,
            syntactic: 3,
            semantic: 2,
        }
    );
    assert_eq!(session.diagnostics.len(), compilation.errors.counts().total());
}

#[test]
fn rendered_diagnostics() {
    let source = "fn main() {\n  let x: int;\n  x = 2.5;\n  y = x;\n}";
    assert_snapshot_with_source!(source => rendered(source), @r#"
    Error: mismatched types in assignment to 'x': expected int, found float
    In main.p:3
    1 │ fn main() {
    2 │   let x: int;
    3 │   x = 2.5;
      │   ^^^^^^^^  expected int due to the declaration
    4 │   y = x;
    5 │ }

    Error: variable 'y' is not declared
    In main.p:4
    2 │   let x: int;
    3 │   x = 2.5;
    4 │   y = x;
      │   ^^^^^^  not declared
    5 │ }

    "#);
}

#[test]
fn redeclaration_points_at_both_lines() {
    let source = "fn f(a: int) {\n  let a: float;\n}";
    assert_snapshot_with_source!(source => rendered(source), @r"
    Error: 'a' is already declared in scope 'f'
    In main.p:2
    1 │ fn f(a: int) {
      │ ^^^^^^^^^^^^^^  first declared here
    2 │   let a: float;
      │   ^^^^^^^^^^^^^  declared again here
    3 │ }
    ");
}

#[test]
fn emitted_errors() {
    let source = "fn main() {\n  x = 1 @ 2;\n}";
    let (_, compilation, ok) = check(source);
    assert!(!ok);

    let json = emit_json(&compilation, Emit::Errors).unwrap();
    assert_snapshot_with_source!(source => json, @r#"
    {
      "lexical": [
        {
          "line": 2,
          "message": "unrecognized token '@'"
        }
      ],
      "semantic": [
        {
          "line": 2,
          "message": "variable 'x' is not declared"
        }
      ],
      "syntactic": [
        {
          "line": 2,
          "message": "expected SEMICOLON, found ERRO"
        }
      ]
    }
    "#);
}

#[test]
fn emitted_tables() {
    let (_, compilation, ok) = check("fn main() { let x: int; x = 1; }");
    assert!(ok);

    let lexemes = emit_json(&compilation, Emit::Lexemes).unwrap();
    assert!(lexemes.contains(r#""identifiers""#));

    let symbols = emit_json(&compilation, Emit::Symbols).unwrap();
    assert!(symbols.contains(r#""scope_name": "main""#));
    assert!(symbols.contains(r#""category": "variable""#));
}

#[test]
fn emitted_tokens() {
    let (_, compilation, ok) = check(EXAMPLE);
    assert!(ok);

    let json = emit_json(&compilation, Emit::Tokens).unwrap();
    assert_snapshot_with_source!(EXAMPLE => json, @r#"
    [
      {
        "kind": "FUNCTION",
        "lexeme": "fn",
        "line": 1
      },
      {
        "kind": "MAIN",
        "lexeme": "main",
        "line": 1
      },
      {
        "kind": "LBRACKET",
        "lexeme": "(",
        "line": 1
      },
      {
        "kind": "RBRACKET",
        "lexeme": ")",
        "line": 1
      },
      {
        "kind": "LBRACE",
        "lexeme": "{",
        "line": 1
      },
      {
        "kind": "LET",
        "lexeme": "let",
        "line": 1
      },
      {
        "kind": "ID",
        "lexeme": "x",
        "line": 1
      },
      {
        "kind": "COLON",
        "lexeme": ":",
        "line": 1
      },
      {
        "kind": "INT",
        "lexeme": "int",
        "line": 1
      },
      {
        "kind": "SEMICOLON",
        "lexeme": ";",
        "line": 1
      },
      {
        "kind": "ID",
        "lexeme": "x",
        "line": 1
      },
      {
        "kind": "ASSIGN",
        "lexeme": "=",
        "line": 1
      },
      {
        "kind": "INT_CONST",
        "lexeme": "5",
        "line": 1
      },
      {
        "kind": "SEMICOLON",
        "lexeme": ";",
        "line": 1
      },
      {
        "kind": "PRINTLN",
        "lexeme": "println",
        "line": 1
      },
      {
        "kind": "LBRACKET",
        "lexeme": "(",
        "line": 1
      },
      {
        "kind": "FMT_STRING",
        "lexeme": "\"{}\"",
        "line": 1
      },
      {
        "kind": "COMMA",
        "lexeme": ",",
        "line": 1
      },
      {
        "kind": "ID",
        "lexeme": "x",
        "line": 1
      },
      {
        "kind": "RBRACKET",
        "lexeme": ")",
        "line": 1
      },
      {
        "kind": "SEMICOLON",
        "lexeme": ";",
        "line": 1
      },
      {
        "kind": "RETURN",
        "lexeme": "return",
        "line": 1
      },
      {
        "kind": "ID",
        "lexeme": "x",
        "line": 1
      },
      {
        "kind": "SEMICOLON",
        "lexeme": ";",
        "line": 1
      },
      {
        "kind": "RBRACE",
        "lexeme": "}",
        "line": 1
      },
      {
        "kind": "EOF",
        "lexeme": "",
        "line": 1
      }
    ]
    "#);
}

#[test]
fn emitted_ast() {
    let (_, compilation, ok) = check(EXAMPLE);
    assert!(ok);

    let json = emit_json(&compilation, Emit::Ast).unwrap();
    assert_snapshot_with_source!(EXAMPLE => json, @r#"
    {
      "functions": [
        {
          "node": "Function",
          "name": "main",
          "params": [],
          "body": {
            "node": "Block",
            "commands": [
              {
                "node": "Assign",
                "name": "x",
                "expr": {
                  "node": "IntConst",
                  "value": 5,
                  "line": 1
                },
                "line": 1
              },
              {
                "node": "Print",
                "args": [
                  {
                    "node": "StringLit",
                    "value": "{}",
                    "line": 1
                  },
                  {
                    "node": "Var",
                    "name": "x",
                    "line": 1,
                    "type": "int"
                  }
                ],
                "line": 1
              },
              {
                "node": "Return",
                "expr": {
                  "node": "Var",
                  "name": "x",
                  "line": 1,
                  "type": "int"
                },
                "line": 1
              }
            ]
          },
          "line": 1
        }
      ]
    }
    "#);
}
