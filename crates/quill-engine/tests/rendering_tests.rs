//! Rendering behavior across the public engine API

use std::collections::HashMap;
use std::sync::Arc;

use quill_core::{CoreError, PlaceholderValue, Template, TemplateDocument, TemplateSource};
use quill_engine::{Engine, EngineError, EngineErrorKind};

fn render(template: &Template) -> String {
    Engine::default().render_to_string(template).unwrap()
}

fn source(templates: Vec<Template>) -> HashMap<String, Arc<Template>> {
    templates
        .into_iter()
        .map(|t| (t.display_name().to_string(), t.into_shared()))
        .collect()
}

#[test]
fn test_literal_renders_verbatim() {
    let text = "class A {\n  int x;\n\n  int y;\n}";
    assert_eq!(render(&Template::literal(text)), text);
}

#[test]
fn test_multi_line_value_inherits_line_indent() {
    let template = Template::builder()
        .text("class A\n{\n    ")
        .value("int x;\nint y;")
        .text("\n}")
        .build();

    assert_eq!(render(&template), "class A\n{\n    int x;\n    int y;\n}");
}

#[test]
fn test_mid_line_value_uses_leading_whitespace() {
    let template = Template::builder()
        .text("{\n    var x = ")
        .value("Call(\n    a)")
        .text("\n}")
        .build();

    assert_eq!(render(&template), "{\n    var x = Call(\n        a)\n}");
}

#[test]
fn test_heredoc_layout_loses_common_margin() {
    let template = Template::builder()
        .text("\n        public class ")
        .value("Users")
        .text("\n        {\n            ")
        .value("public int Id { get; set; }\npublic int Age { get; set; }")
        .text("\n        }\n        ")
        .build();

    assert_eq!(
        render(&template),
        "public class Users\n{\n    public int Id { get; set; }\n    public int Age { get; set; }\n}"
    );
}

#[test]
fn test_render_continues_partial_buffer_line() {
    let engine = Engine::default();
    let mut output = engine.output_context();

    output.write("A.cs", "class A\n{\n    ");
    let body = Template::builder().value("int x;\nint y;").text("\n}").build();
    engine.render(&mut output, "A.cs", &body).unwrap();
    assert_eq!(output.contents("A.cs").unwrap(), "class A\n{\n    int x;\n    int y;\n}");

    output.write("B.cs", "    var x = ");
    let call = Template::builder().value("Call(\n    a)").build();
    engine.render(&mut output, "B.cs", &call).unwrap();
    assert_eq!(output.contents("B.cs").unwrap(), "    var x = Call(\n        a)");
}

#[test]
fn test_render_after_buffer_indent_change() {
    let engine = Engine::default();
    let mut output = engine.output_context();

    output.write("A.cs", "namespace N\n{\n");
    output.buffer_mut("A.cs").increase_indent();
    output.write("A.cs", "class A : ");
    let bases = Template::builder().value("IA,\nIB").build();
    engine.render(&mut output, "A.cs", &bases).unwrap();

    assert_eq!(
        output.contents("A.cs").unwrap(),
        "namespace N\n{\n    class A : IA,\n    IB"
    );
}

#[test]
fn test_tab_and_mixed_indentation_kept_verbatim() {
    let tabs = Template::builder().text("x\n\t\t").value("a\nb").build();
    assert_eq!(render(&tabs), "x\n\t\ta\n\t\tb");

    let mixed = Template::builder().text("x\n \t").value("a\nb").build();
    assert_eq!(render(&mixed), "x\n \ta\n \tb");
}

#[test]
fn test_sequence_skips_empty_items() {
    let items = PlaceholderValue::Sequence(vec![
        PlaceholderValue::Empty,
        "a".into(),
        "".into(),
        Template::literal("").into(),
        "b".into(),
    ]);
    let template = Template::builder().text("{\n  ").value(items).build();

    assert_eq!(render(&template), "{\n  a\n  b");
}

#[test]
fn test_empty_value_leaves_line_untouched() {
    let template = Template::builder()
        .text("before ")
        .value(PlaceholderValue::Empty)
        .text("after")
        .build();

    assert_eq!(render(&template), "before after");
}

#[test]
fn test_nested_template_equals_inlined_text() {
    let property = Template::builder()
        .text("public int ")
        .value("Id")
        .text(" { get; set; }")
        .build();
    let body = Template::builder()
        .text("public class A\n{\n    ")
        .value(vec![property.clone(), property])
        .text("\n}")
        .build();
    let nested = Template::builder()
        .text("namespace N\n{\n    ")
        .value(body)
        .text("\n}")
        .build();

    let flat = Template::literal(
        "namespace N\n{\n    public class A\n    {\n        public int Id { get; set; }\n        public int Id { get; set; }\n    }\n}",
    );

    assert_eq!(render(&nested), render(&flat));
}

#[test]
fn test_whitespace_only_line_stripping() {
    let template = Template::builder()
        .text("a\n")
        .value("   ")
        .text("\nb")
        .build();

    let stripping = Engine::default();
    assert_eq!(stripping.render_to_string(&template).unwrap(), "a\n\nb");

    let keeping = Engine::builder()
        .strip_whitespace_on_empty_lines(false)
        .build();
    assert_eq!(keeping.render_to_string(&template).unwrap(), "a\n   \nb");
}

#[test]
fn test_blank_line_inside_indented_nested_template() {
    let inner = Template::literal("x\n\ny");
    let template = Template::builder()
        .text("{\n    ")
        .value(inner)
        .text("\n}")
        .build();

    let stripping = Engine::default();
    assert_eq!(
        stripping.render_to_string(&template).unwrap(),
        "{\n    x\n\n    y\n}"
    );

    let keeping = Engine::builder()
        .strip_whitespace_on_empty_lines(false)
        .build();
    assert_eq!(
        keeping.render_to_string(&template).unwrap(),
        "{\n    x\n    \n    y\n}"
    );
}

#[test]
fn test_direct_cycle_detected() {
    let templates = source(vec![
        Template::builder()
            .name("a")
            .text("a:")
            .value(PlaceholderValue::include("a"))
            .build(),
    ]);
    let root = templates["a"].clone();
    let engine = Engine::builder().source(Arc::new(templates)).build();

    match engine.render_to_string(&root) {
        Err(EngineError::CyclicTemplate { chain }) => assert_eq!(chain, ["a", "a"]),
        other => panic!("expected a cycle, got {:?}", other),
    }
}

#[test]
fn test_transitive_cycle_detected() {
    let templates = source(vec![
        Template::builder()
            .name("a")
            .value(PlaceholderValue::include("b"))
            .build(),
        Template::builder()
            .name("b")
            .text("  ")
            .value(vec![PlaceholderValue::include("a")])
            .build(),
    ]);
    let root = templates["a"].clone();
    let engine = Engine::builder().source(Arc::new(templates)).build();

    let err = engine.render_to_string(&root).unwrap_err();
    assert_eq!(err.kind(), EngineErrorKind::CyclicTemplate);
    assert_eq!(err.to_string(), "Cyclic template: a -> b -> a");
}

/// Hands out a new copy of a template on every lookup
struct FreshCopies(HashMap<String, Template>);

impl TemplateSource for FreshCopies {
    fn template(&self, name: &str) -> Option<Arc<Template>> {
        self.0.get(name).cloned().map(Arc::new)
    }
}

fn fresh_copies(templates: Vec<Template>) -> FreshCopies {
    FreshCopies(
        templates
            .into_iter()
            .map(|t| (t.display_name().to_string(), t))
            .collect(),
    )
}

#[test]
fn test_cycle_detected_when_source_copies_templates() {
    let copies = fresh_copies(vec![
        Template::builder()
            .name("loop")
            .value(PlaceholderValue::include("loop"))
            .build(),
        Template::builder()
            .name("a")
            .text("a:")
            .value(PlaceholderValue::include("b"))
            .build(),
        Template::builder()
            .name("b")
            .value(PlaceholderValue::include("a"))
            .build(),
    ]);
    let root = copies.template("loop").unwrap();
    let engine = Engine::builder().source(Arc::new(copies)).build();

    match engine.render_to_string(&root) {
        Err(EngineError::CyclicTemplate { chain }) => assert_eq!(chain, ["loop", "loop"]),
        other => panic!("expected a cycle, got {:?}", other),
    }

    let root = Template::builder()
        .name("root")
        .value(PlaceholderValue::include("a"))
        .build();
    match engine.render_to_string(&root) {
        Err(EngineError::CyclicTemplate { chain }) => assert_eq!(chain, ["a", "b", "a"]),
        other => panic!("expected a cycle, got {:?}", other),
    }
}

#[test]
fn test_repeated_include_is_not_a_cycle() {
    let templates = source(vec![
        Template::literal("x").named("leaf"),
        Template::builder()
            .name("root")
            .value(PlaceholderValue::include("leaf"))
            .text(",")
            .value(PlaceholderValue::include("leaf"))
            .build(),
    ]);
    let root = templates["root"].clone();
    let engine = Engine::builder().source(Arc::new(templates)).build();

    assert_eq!(engine.render_to_string(&root).unwrap(), "x,x");
}

#[test]
fn test_nesting_depth_limit() {
    let engine = Engine::builder().max_nesting_depth(2).build();

    let two_deep = Template::builder()
        .value(Template::builder().value(Template::literal("ok")).build())
        .build();
    assert_eq!(engine.render_to_string(&two_deep).unwrap(), "ok");

    let three_deep = Template::builder().value(two_deep).build();
    match engine.render_to_string(&three_deep) {
        Err(EngineError::NestingDepthExceeded { depth, limit }) => {
            assert_eq!(depth, 3);
            assert_eq!(limit, 2);
        }
        other => panic!("expected depth error, got {:?}", other),
    }
}

#[test]
fn test_depth_counts_templates_not_sequences() {
    let engine = Engine::builder().max_nesting_depth(2).build();

    let mut flat: PlaceholderValue = "x".into();
    for _ in 0..5 {
        flat = PlaceholderValue::Sequence(vec![flat]);
    }
    let template = Template::builder().value(flat).build();
    assert_eq!(engine.render_to_string(&template).unwrap(), "x");

    let leaf = Template::literal("ok");
    let middle = Template::builder().value(vec![leaf]).build();
    let two_deep = Template::builder().value(vec![middle]).build();
    assert_eq!(engine.render_to_string(&two_deep).unwrap(), "ok");

    let three_deep = Template::builder().value(vec![two_deep]).build();
    match engine.render_to_string(&three_deep) {
        Err(EngineError::NestingDepthExceeded { depth, limit }) => {
            assert_eq!(depth, 3);
            assert_eq!(limit, 2);
        }
        other => panic!("expected depth error, got {:?}", other),
    }
}

#[test]
fn test_outputs_are_isolated() {
    let engine = Engine::default();
    let mut output = engine.output_context();

    engine
        .render(&mut output, "A.cs", &Template::literal("class A {}"))
        .unwrap();
    engine
        .render(&mut output, "B.cs", &Template::literal("class B {}"))
        .unwrap();

    assert_eq!(output.contents("A.cs").unwrap(), "class A {}");
    assert_eq!(output.contents("B.cs").unwrap(), "class B {}");
}

#[test]
fn test_concurrent_renders_share_engine_and_templates() {
    let engine = Engine::default();
    let shared = Template::builder()
        .text("{\n  ")
        .value(vec!["a", "b", "c"])
        .text("\n}")
        .build()
        .into_shared();

    let results: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = &engine;
                let template = Arc::clone(&shared);
                scope.spawn(move || engine.render_to_string(&template).unwrap())
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for result in results {
        assert_eq!(result, "{\n  a\n  b\n  c\n}");
    }
}

const DOCUMENT: &str = r#"
templates:
  property:
    - "public string Name { get; set; }"
  class:
    - "public class User\n{\n    "
    - include: property
    - "\n}\n"
  loop:
    - include: loop
outputs:
  User.cs: class
  Loop.cs: loop
"#;

#[test]
fn test_render_document_stops_at_first_error() {
    let document = TemplateDocument::from_yaml(DOCUMENT).unwrap();
    let err = Engine::default().render_document(&document).unwrap_err();

    assert!(matches!(err, EngineError::CyclicTemplate { chain } if chain == ["loop", "loop"]));
}

#[test]
fn test_render_document_collect_errors() {
    let document = TemplateDocument::from_yaml(DOCUMENT).unwrap();
    let result = Engine::default().render_document_collect_errors(&document);

    assert!(!result.is_success());
    assert_eq!(result.report.successful_outputs, ["User.cs"]);
    assert!(result.report.errors_by_output.contains_key("Loop.cs"));
    assert_eq!(result.report.summary(), "1 error in 2 outputs");

    assert_eq!(
        result.output.contents("User.cs").unwrap(),
        "public class User\n{\n    public string Name { get; set; }\n}"
    );
    assert!(!result.output.contains("Loop.cs"));
}

#[test]
fn test_unsupported_value_kind_from_document() {
    let err = TemplateDocument::from_yaml("templates:\n  a:\n    - \"x\"\n    - closure: f\n")
        .unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedValueKind { ref kind, .. } if kind == "closure"));

    let err = EngineError::from(err);
    assert_eq!(err.kind(), EngineErrorKind::UnsupportedValueKind);
}
