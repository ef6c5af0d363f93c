use super::*;

#[test]
fn test_parse_bare_name() {
    let expr: TypeExpr = "String".parse().unwrap();
    assert_eq!(expr, TypeExpr::simple("String"));
    assert!(expr.is_simple());
}

#[test]
fn test_parse_nested_arguments() {
    let expr: TypeExpr = "Map<K, List<V>>".parse().unwrap();
    assert_eq!(expr.name, "Map");
    assert_eq!(expr.args.len(), 2);
    assert_eq!(expr.args[0], TypeExpr::simple("K"));
    assert_eq!(
        expr.args[1],
        TypeExpr::applied("List", vec![TypeExpr::simple("V")])
    );
}

#[test]
fn test_parse_qualified_name_and_whitespace() {
    let expr: TypeExpr = "  Map.Entry< K ,V >  ".parse().unwrap();
    assert_eq!(expr.name, "Map.Entry");
    assert_eq!(expr.to_string(), "Map.Entry<K, V>");
}

#[test]
fn test_display_is_canonical() {
    let expr: TypeExpr = "Iterator<Collection<E>>".parse().unwrap();
    assert_eq!(expr.to_string(), "Iterator<Collection<E>>");
    assert_eq!(expr.to_string().parse::<TypeExpr>().unwrap(), expr);
}

#[test]
fn test_malformed_expressions_are_rejected() {
    for text in ["", "<E>", "List<", "List<E", "List<>", "List<E>>", "A B", "Map..Entry", ".E"] {
        let err = text.parse::<TypeExpr>().unwrap_err();
        assert_eq!(err.text, text, "input {text:?}");
    }
}

#[test]
fn test_nesting_limit() {
    let depth = bridgeck_common::limits::MAX_TYPE_EXPR_DEPTH as usize + 2;
    let text = format!("{}E{}", "List<".repeat(depth), ">".repeat(depth));
    let err = text.parse::<TypeExpr>().unwrap_err();
    assert_eq!(err.reason, "type arguments nested too deeply");
}

#[test]
fn test_string_conversions() {
    // serde goes through these two conversions.
    let expr = TypeExpr::try_from("Collection<E>".to_string()).unwrap();
    assert_eq!(expr, TypeExpr::applied("Collection", vec![TypeExpr::simple("E")]));
    assert_eq!(String::from(expr), "Collection<E>");
    assert!(TypeExpr::try_from("Collection<".to_string()).is_err());
}
