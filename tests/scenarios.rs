mod common;

use pl0c::{ErrorContent, Expected, ScalarType, SymbolKind, TokenKind};
use pretty_assertions::assert_eq as eq;

use common::{parse, traced, NESTED};

#[test]
fn single_scalar() {
    let scopes = parse("program p ; var int x ; begin x := 1 ; end").unwrap();
    eq!(scopes.len(), 1);
    let p = scopes.lookup("p").unwrap();
    eq!(p.outer(), None);
    eq!(p.return_type(), None);
    let x = p.get("x").unwrap();
    eq!(
        x.kind,
        SymbolKind::Scalar {
            ty: ScalarType::Int,
            is_reference: false
        }
    );
    eq!(x.storage_size, 4);
    eq!(p.storage_size(), 4);
}

#[test]
fn multi_dimensional_array() {
    let scopes = parse("program p ; arr int a [ 3 , 4 ] ; begin a [ 1 , 1 ] := 2 ; end").unwrap();
    let a = scopes.lookup("p").unwrap().get("a").unwrap();
    eq!(
        a.kind,
        SymbolKind::Array {
            element: ScalarType::Int,
            extents: vec![3, 4],
            is_reference: false
        }
    );
    eq!(a.storage_size, 48);
}

#[test]
fn nested_procedure() {
    let scopes = parse(
        "program p ;
         procedure int f ( var int n ) ;
         begin return n ; end
         begin write ( 1 ) ; end",
    )
    .unwrap();
    eq!(scopes.names().collect::<Vec<_>>(), ["p", "f"]);
    let f = scopes.lookup("f").unwrap();
    eq!(f.outer(), Some("p"));
    eq!(f.return_type(), Some(ScalarType::Int));
    eq!(f.params(), ["n"]);
    eq!(f.argc(), 1);
    assert!(f.get("n").unwrap().is_reference());
    let slot = scopes.lookup("p").unwrap().get("f").unwrap();
    eq!(
        slot.kind,
        SymbolKind::Procedure {
            return_type: ScalarType::Int
        }
    );
    eq!(slot.storage_size, 4);
}

#[test]
fn duplicate_variable() {
    let err = parse("program p ; var int x ; var int x ; begin x := 1 ; end").unwrap_err();
    eq!(
        err.content,
        ErrorContent::DuplicateSymbol {
            name: "x",
            scope: "p"
        }
    );
}

#[test]
fn missing_semicolon_after_declaration() {
    let source = "program p ; var int x begin x := 1 ; end";
    let err = pl0c::recognize(traced("e.pl0", source)).unwrap_err();
    eq!(
        err.content,
        ErrorContent::SyntaxMismatch {
            expected: Expected::Token(TokenKind::Semicolon),
            found: Some(TokenKind::Begin),
        }
    );
    let begin = source.find("begin").unwrap();
    eq!(err.location.range, (begin, begin + 5));
    eq!(err.to_string(), format!("e.pl0:{}:{}: expected `;`, found `begin`", begin, begin + 5));
}

#[test]
fn end_of_input_points_at_last_token() {
    let source = "program p ; begin x := 1 ;";
    let err = pl0c::recognize(traced("eof.pl0", source)).unwrap_err();
    eq!(
        err.content,
        ErrorContent::SyntaxMismatch {
            expected: Expected::Token(TokenKind::Semicolon),
            found: None,
        }
    );
    eq!(err.location.range, (source.len() - 1, source.len()));
}

#[test]
fn nested_sample() {
    let scopes = parse(NESTED).unwrap();
    eq!(
        scopes.names().collect::<Vec<_>>(),
        ["main", "A", "B", "C", "D"]
    );

    let outer = |name: &'static str| scopes.lookup(name).unwrap().outer();
    eq!(outer("main"), None);
    eq!(outer("A"), Some("main"));
    eq!(outer("B"), Some("A"));
    eq!(outer("C"), Some("B"));
    eq!(outer("D"), Some("A"));

    let main = scopes.lookup("main").unwrap();
    let sizes: Vec<_> = main
        .iter()
        .map(|(name, s)| (name, s.offset, s.storage_size))
        .collect();
    eq!(
        sizes,
        [
            ("x", 0, 4),
            ("res_D", 4, 4),
            ("y", 8, 60),
            ("z", 68, 240),
            ("A", 308, 4)
        ]
    );
    eq!(main.storage_size(), 312);

    let c = scopes.lookup("C").unwrap();
    eq!(c.params(), ["param", "a"]);
    let a = c.get("a").unwrap();
    eq!(
        a.kind,
        SymbolKind::Array {
            element: ScalarType::Int,
            extents: vec![],
            is_reference: true
        }
    );
    eq!(c.get("x").unwrap().offset, 8);
    eq!(c.storage_size(), 12);

    eq!(scopes.lookup("A").unwrap().storage_size(), 12);
    eq!(scopes.lookup("B").unwrap().storage_size(), 12);
    eq!(scopes.lookup("D").unwrap().storage_size(), 8);
    eq!(
        scopes.lookup("D").unwrap().return_type(),
        Some(ScalarType::Float)
    );
}

#[test]
fn rendering() {
    let scopes = parse(
        "program p ;
         procedure int f ( var int n ) ;
         begin return n ; end
         begin write ( 1 ) ; end",
    )
    .unwrap();
    eq!(
        scopes.to_string(),
        "\
p_table:
{
    name: p
    outer: none
    argc: 0
    arglist: ()
    rtype: none
    size: 4
    f: procedure -> int, size 4, offset 0
}
f_table:
{
    name: f
    outer: p_table
    argc: 1
    arglist: (n)
    rtype: int
    size: 4
    n: var int, size 4, offset 0
}"
    );
}
