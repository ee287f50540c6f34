use startrace::{
    context::DynamicContext,
    descriptor::{PatternDescriptor, TokenDescriptor},
    error::{BuildError, DescriptorError, EvalError, ParseError},
    interpreter::value::{
        core::{Bindings, Value},
        function::Function,
    },
    pattern::Pattern,
    token::{Token, link::LinkOptions},
};

fn times(factor: i64) -> Function {
    Function::unary(move |v| match v {
        Value::Integer(n) => Ok(Value::Integer(n * factor)),
        other => Err(EvalError::host(format!("cannot scale a {}", other.type_name()))),
    })
}

fn bindings<const N: usize>(entries: [(&str, Value); N]) -> Bindings {
    entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn link(source: &str, bindings: Bindings) -> Token {
    Token::link(source, bindings, LinkOptions::allowed()).unwrap()
}

#[test]
fn link_reads_cells_on_every_render() {
    let x = DynamicContext::new(10);
    let y = DynamicContext::new(times(2));
    let token = link("y(x)", bindings([("x", x.clone().into()), ("y", y.clone().into())]));

    assert_eq!(token.render().unwrap(), "20");
    y.set(times(3));
    assert_eq!(token.render().unwrap(), "30");
    x.set(7);
    assert_eq!(token.render().unwrap(), "21");
}

#[test]
fn links_in_a_pattern_share_global_cells() {
    let x = DynamicContext::new(10);
    let descriptor = PatternDescriptor { tokens:         vec![TokenDescriptor::link("y(x)"),
                                                              TokenDescriptor::Const { value: " ".into() },
                                                              TokenDescriptor::link("y(x * 2)")],
                                         global_context: bindings([("x", x.clone().into()),
                                                                   ("y", times(2).into())]),
                                         eval_allowed:   true, };
    let pattern = Pattern::from_descriptor(&descriptor).unwrap();

    assert_eq!(pattern.render().unwrap(), "20 40");
    x.set(15);
    assert_eq!(pattern.render().unwrap(), "30 60");
}

#[test]
fn cell_holding_a_function_is_invoked_when_rendered() {
    let ticks = DynamicContext::new(0);
    let source = ticks.clone();
    let next = Function::nullary(move || {
        source.update(|v| match v {
                  Value::Integer(n) => Value::Integer(n + 1),
                  other => other,
              });
        Ok(source.get())
    });
    let token = link("tick", bindings([("tick", DynamicContext::new(next).into())]));

    // Validation already rendered once.
    let first = token.render().unwrap();
    let second = token.render().unwrap();
    assert_eq!(first, "2");
    assert_eq!(second, "3");
}

#[test]
fn expression_language() {
    let env = bindings([("n", Value::Integer(7)),
                        ("r", Value::Real(0.5)),
                        ("name", "sensor".into()),
                        ("sensors", Value::array([3, 5, 8])),
                        ("flag", Value::Bool(true))]);
    let cases = [("n + 1", "8"),
                 ("n - 10", "-3"),
                 ("n * r", "3.5"),
                 ("n / 7", "1"),
                 ("n / 2", "3.5"),
                 ("-n % 3", "2"),
                 ("(n + 1) * 2", "16"),
                 ("name + '_' + 'x'", "sensor_x"),
                 ("sensors[1]", "5"),
                 ("sensors[-1]", "8"),
                 ("name[0]", "s"),
                 ("n > 5 and flag", "true"),
                 ("not flag or n == 7.0", "true"),
                 ("n != 7", "false"),
                 ("'a' < 'b'", "true"),
                 ("[n, name]", "[7, \"sensor\"]")];

    for (source, expected) in cases {
        let token = link(source, env.clone());
        assert_eq!(token.render().unwrap(), expected, "rendering {source}");
    }
}

#[test]
fn only_bound_names_are_visible() {
    for source in ["__import__('os')", "open('x')", "print", "len(sensors)"] {
        let result = Token::link(source, Bindings::new(), LinkOptions::allowed());
        assert!(matches!(result,
                         Err(BuildError::LinkValidation { source: EvalError::UnknownVariable { .. },
                                                          .. })),
                "{source} should not resolve");
    }
}

#[test]
fn attribute_access_is_not_part_of_the_language() {
    let env = bindings([("name", "sensor".into())]);
    let result = Token::link("name.upper()", env, LinkOptions::allowed());
    assert!(matches!(result, Err(BuildError::InvalidLink { .. })));
}

#[test]
fn calling_a_non_function_fails() {
    let env = bindings([("n", Value::Integer(1))]);
    let result = Token::link("n(1)", env, LinkOptions::allowed());
    assert!(matches!(result,
                     Err(BuildError::LinkValidation { source: EvalError::NotCallable { found: "integer" },
                                                      .. })));
}

#[test]
fn render_time_failures_surface_as_eval_errors() {
    let divisor = DynamicContext::new(2);
    let token = link("10 / d", bindings([("d", divisor.clone().into())]));
    assert_eq!(token.render().unwrap(), "5");

    divisor.set(0);
    assert_eq!(token.render(), Err(EvalError::DivisionByZero));

    divisor.set(Value::array([1]));
    assert!(matches!(token.render(), Err(EvalError::TypeError { .. })));
}

#[test]
fn host_function_errors_pass_through() {
    let env = bindings([("scale", times(2).into())]);
    let token = Token::link("scale('x')", env, LinkOptions::allowed().without_validation()).unwrap();
    assert_eq!(token.render(),
               Err(EvalError::Host { message: "cannot scale a string".to_string() }));
}

#[test]
fn link_result_must_be_renderable() {
    let env = bindings([("f", times(2).into())]);
    let result = Token::link("f", env, LinkOptions::allowed());
    assert!(matches!(result,
                     Err(BuildError::LinkValidation { source: EvalError::Unstringifiable { .. },
                                                      .. })));
}

#[test]
fn pattern_level_permission_applies_to_links() {
    let tokens = vec![TokenDescriptor::link("1 + 1")];
    let denied = PatternDescriptor { tokens,
                                     ..Default::default() };
    assert_eq!(Pattern::from_descriptor(&denied), Err(BuildError::EvalNotAllowed));

    let allowed = denied.with_eval_allowed(true);
    assert_eq!(Pattern::from_descriptor(&allowed).unwrap().render().unwrap(), "2");

    let overridden = PatternDescriptor { tokens: vec![TokenDescriptor::Link { link:         "1 + 1".to_string(),
                                                                             context:      None,
                                                                             eval_allowed: Some(false),
                                                                             validate:     true, }],
                                         ..allowed };
    assert_eq!(Pattern::from_descriptor(&overridden), Err(BuildError::EvalNotAllowed));
}

#[test]
fn describe_lists_the_bindings() {
    let token = link("x", bindings([("x", DynamicContext::new(1).into())]));
    assert_eq!(token.describe(), r#"LinkToken(x, {"x": Cell(1)})"#);
}

#[test]
fn cells_that_contain_themselves_fail_instead_of_recursing() {
    let direct = DynamicContext::new(0);
    direct.set(direct.clone());

    let through_array = DynamicContext::new(0);
    through_array.set(Value::array([Value::Cell(through_array.clone())]));

    let mut entries = Bindings::new();
    let through_map = DynamicContext::new(0);
    entries.insert("me".to_string(), through_map.clone().into());
    through_map.set(entries);

    for cell in [&direct, &through_array, &through_map] {
        let value = Value::Cell(cell.clone());
        assert!(matches!(value.render(), Err(EvalError::TypeError { .. })));
        assert!(value.describe().contains("Cell(...)"), "{}", value.describe());
        assert!(format!("{value:?}").starts_with("Cell(DynamicContext("));

        let token = link("1", bindings([("c", value.clone())]));
        assert!(token.describe().starts_with("LinkToken(1, {\"c\": Cell("));
        assert!(matches!(token.to_descriptor().to_json(),
                         Err(DescriptorError::Unserializable { found: "cell", .. })));
        assert!(serde_json::to_value(&value).is_err());

        let result = Token::link("c", bindings([("c", value)]), LinkOptions::allowed());
        assert!(matches!(result,
                         Err(BuildError::LinkValidation { source: EvalError::TypeError { .. },
                                                          .. })));
    }

    for cell in [direct, through_array, through_map] {
        cell.set(0);
    }
}

#[test]
fn deeply_nested_expressions_are_rejected_while_parsing() {
    let env = bindings([("n", Value::Integer(1))]);
    let parens = format!("{}n{}", "(".repeat(3000), ")".repeat(3000));
    let chain = format!("1{}", "+1".repeat(20_000));
    let negations = format!("{}n", "-".repeat(3000));
    let calls = format!("n{}", "[0]".repeat(3000));
    let arrays = format!("{}n{}", "[".repeat(3000), "]".repeat(3000));

    for source in [&parens, &chain, &negations, &calls, &arrays] {
        let result = Token::link(source, env.clone(), LinkOptions::allowed());
        assert!(matches!(result,
                         Err(BuildError::InvalidLink { source: ParseError::TooDeep { .. },
                                                       .. })),
                "{}...",
                &source[..20]);
    }
}

#[test]
fn expressions_within_the_nesting_limit_still_evaluate() {
    let env = bindings([("n", Value::Integer(1))]);
    let parens = format!("{}n{}", "(".repeat(40), ")".repeat(40));
    let chain = format!("n{}", "+n".repeat(40));

    assert_eq!(link(&parens, env.clone()).render().unwrap(), "1");
    assert_eq!(link(&chain, env).render().unwrap(), "41");
}

#[test]
fn large_integers_compare_exactly_with_reals() {
    let big = 1_i64 << 60;
    let env = bindings([("x", Value::Integer(big)), ("y", Value::Integer(big + 1))]);
    let cases = [("x == 1.0", "false"),
                 ("x > 1.0", "true"),
                 ("1.0 < x", "true"),
                 ("x == 1152921504606846976.0", "true"),
                 ("y == 1152921504606846976.0", "false"),
                 ("y > 1152921504606846976.0", "true"),
                 ("1152921504606846976.0 < y", "true"),
                 ("x < 1e300", "true"),
                 ("-x > -1e300", "true"),
                 ("x > 1152921504606846720.0", "true")];

    for (source, expected) in cases {
        let token = link(source, env.clone());
        assert_eq!(token.render().unwrap(), expected, "rendering {source}");
    }
}
