//! Generation pipeline tests with a scripted template engine.
//!
//! The engine used here never reads template files: it reacts to the template
//! name, which lets the tests drive embedded generations and failures.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use scribe_codegen::{
    Error, ErrorKind, Result,
    engine::{RenderContext, TemplateEngine},
    generation::{EmbeddedGenerator, Generator, Ledger, RuntimeConfig, Target, build_target},
};
use scribe_manifest::{Bundle, EntityScope, TargetDefinition};
use scribe_model::{Attribute, Entity, Model, NeutralType};
use tempfile::TempDir;

fn engine<F>(f: F) -> Arc<dyn TemplateEngine>
where
    F: Fn(&Path, &RenderContext) -> Result<String> + Send + Sync + 'static,
{
    Arc::new(f)
}

fn model() -> Arc<Model> {
    Arc::new(Model::new(
        "garage",
        vec![
            Entity::new("Car", vec![Attribute::new("brand", NeutralType::String)]),
            Entity::new("Driver", vec![Attribute::new("name", NeutralType::String)]),
            Entity::new("Owner", vec![]),
        ],
    ))
}

fn selected(names: &[&str]) -> Arc<[String]> {
    names.iter().map(|n| n.to_string()).collect()
}

fn generator(temp: &TempDir, engine: Arc<dyn TemplateEngine>) -> Generator {
    let config = RuntimeConfig::new(temp.path().join("out"), temp.path().join("templates"));
    Generator::new(config, "garage", engine).unwrap()
}

fn target(generator: &Generator, model: &Model, definition: TargetDefinition) -> Target {
    build_target(generator.config(), &definition, generator.bundle(), model, None)
}

fn files(ledger: &Ledger) -> Vec<String> {
    ledger
        .targets()
        .iter()
        .map(Target::relative_path)
        .collect()
}

#[test]
fn test_two_embedded_generations_are_recorded_after_outer_target() {
    let temp = TempDir::new().unwrap();
    let generator = generator(
        &temp,
        engine(|template, ctx| {
            if template.ends_with("outer.j2") {
                ctx.generator.generate("Car", "car.txt", "embedded", "inner.j2")?;
                ctx.generator.generate("Driver", "driver.txt", "embedded", "inner.j2")?;
            }
            Ok(format!("{} from {}", ctx.target.file(), ctx.target.bundle()))
        }),
    );
    let model = model();
    let ledger = Ledger::new();
    let outer = target(
        &generator,
        &model,
        TargetDefinition::new("Outer", "outer.txt", "", "outer.j2", EntityScope::Once),
    );

    generator
        .generate_target(&outer, &model, &selected(&["Car"]), &ledger)
        .unwrap();

    assert_eq!(
        files(&ledger),
        vec!["outer.txt", "embedded/car.txt", "embedded/driver.txt"]
    );
    let out = temp.path().join("out");
    assert_eq!(
        std::fs::read_to_string(out.join("embedded/driver.txt")).unwrap(),
        "driver.txt from garage"
    );
    assert!(out.join("outer.txt").exists());
}

#[test]
fn test_embedded_generation_appends_exactly_one_entry() {
    let temp = TempDir::new().unwrap();
    let generator = generator(&temp, engine(|_, ctx| Ok(ctx.target.file().to_string())));
    let model = model();
    let ledger = Ledger::new();
    let first = target(
        &generator,
        &model,
        TargetDefinition::new("First", "first.txt", "", "first.j2", EntityScope::Once),
    );
    let reservation = ledger.reserve();
    ledger.commit(reservation, first.clone());

    let bridge = EmbeddedGenerator::new(
        generator.clone(),
        Arc::clone(&model),
        selected(&[]),
        ledger.clone(),
    );
    bridge
        .generate("  Owner ", "${BEANNAME_LC}.txt", "owners", "owner.j2")
        .unwrap();

    let targets = ledger.targets();
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0], first);
    assert_eq!(targets[1].relative_path(), "owners/owner.txt");
    assert_eq!(targets[1].name(), "Dynamic target");
    assert_eq!(targets[1].entity().map(|e| e.name.as_str()), Some("Owner"));
}

#[test]
fn test_embedded_unknown_entity_fails_without_side_effect() {
    let temp = TempDir::new().unwrap();
    let generator = generator(&temp, engine(|_, _| Ok(String::new())));
    let ledger = Ledger::new();
    let bridge = EmbeddedGenerator::new(generator, model(), selected(&[]), ledger.clone());

    let err = bridge
        .generate("Truck", "truck.txt", "trucks", "truck.j2")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("'Truck'"));
    assert!(ledger.is_empty());
    assert!(!temp.path().join("out/trucks/truck.txt").exists());
}

#[test]
fn test_embedded_blank_argument_names_the_parameter() {
    let temp = TempDir::new().unwrap();
    let generator = generator(&temp, engine(|_, _| Ok(String::new())));
    let ledger = Ledger::new();
    let bridge = EmbeddedGenerator::new(generator, model(), selected(&[]), ledger.clone());

    let cases = [
        (("", "f", "d", "t"), "entity class name"),
        (("Car", " ", "d", "t"), "output file"),
        (("Car", "f", "", "t"), "output folder"),
        (("Car", "f", "d", "\t"), "template file"),
    ];
    for ((entity, file, folder, template), parameter) in cases {
        let err = bridge.generate(entity, file, folder, template).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains(parameter), "{err}");
    }
    assert!(ledger.is_empty());
}

#[test]
fn test_disabled_bridge_used_from_template_fails() {
    let temp = TempDir::new().unwrap();
    let generator = generator(
        &temp,
        engine(|_, _| {
            EmbeddedGenerator::disabled().generate("Car", "car.txt", "cars", "car.j2")?;
            Ok(String::new())
        }),
    );
    let model = model();
    let ledger = Ledger::new();
    let outer = target(
        &generator,
        &model,
        TargetDefinition::new("Outer", "outer.txt", "", "outer.j2", EntityScope::Once),
    );

    let err = generator
        .generate_target(&outer, &model, &selected(&[]), &ledger)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(ledger.is_empty());
    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_wildcard_scope_renders_selected_entities_in_order() {
    let temp = TempDir::new().unwrap();
    let generator = generator(&temp, engine(|_, ctx| Ok(ctx.attributes().len().to_string())));
    let model = model();
    let ledger = Ledger::new();
    let each = target(
        &generator,
        &model,
        TargetDefinition::new("Each", "${BEANNAME}.txt", "beans", "bean.j2", EntityScope::Each),
    );

    generator
        .generate_target(&each, &model, &selected(&["Owner", "Car"]), &ledger)
        .unwrap();

    assert_eq!(files(&ledger), vec!["beans/Owner.txt", "beans/Car.txt"]);
    assert!(!temp.path().join("out/beans/Driver.txt").exists());
    assert_eq!(
        std::fs::read_to_string(temp.path().join("out/beans/Car.txt")).unwrap(),
        "1"
    );
}

#[test]
fn test_failure_stops_iteration_and_leaves_no_file() {
    let temp = TempDir::new().unwrap();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&calls);
    let generator = generator(
        &temp,
        engine(move |template, ctx| {
            let name = ctx.entity().map(|e| e.name.clone()).unwrap_or_default();
            seen.lock().unwrap().push(name.clone());
            if name == "Car" {
                return Err(Error::render(template, "unexpected end of template"));
            }
            Ok(name)
        }),
    );
    let model = model();
    let ledger = Ledger::new();
    let each = target(
        &generator,
        &model,
        TargetDefinition::new("Each", "${BEANNAME}.txt", "", "bean.j2", EntityScope::Each),
    );

    let err = generator
        .generate_target(&each, &model, &selected(&["Driver", "Car", "Owner"]), &ledger)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Render);
    assert_eq!(*calls.lock().unwrap(), vec!["Driver", "Car"]);
    assert_eq!(files(&ledger), vec!["Driver.txt"]);
    assert!(!temp.path().join("out/Car.txt").exists());
    assert!(!temp.path().join("out/Owner.txt").exists());
}

#[test]
fn test_unknown_selected_entity_is_not_found() {
    let temp = TempDir::new().unwrap();
    let generator = generator(&temp, engine(|_, _| Ok(String::new())));
    let model = model();
    let ledger = Ledger::new();
    let each = target(
        &generator,
        &model,
        TargetDefinition::new("Each", "${BEANNAME}.txt", "", "bean.j2", EntityScope::Each),
    );

    let err = generator
        .generate_target(&each, &model, &selected(&["Bus"]), &ledger)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(ledger.is_empty());
}

#[test]
fn test_named_scope_ignores_selection() {
    let temp = TempDir::new().unwrap();
    let generator = generator(&temp, engine(|_, ctx| Ok(ctx.target.file().to_string())));
    let model = model();
    let ledger = Ledger::new();
    let named = target(
        &generator,
        &model,
        TargetDefinition::new(
            "Driver only",
            "${BEANNAME_SNAKE}.md",
            "",
            "driver.j2",
            EntityScope::Entity("Driver".into()),
        ),
    );

    generator
        .generate_target(&named, &model, &selected(&["Car"]), &ledger)
        .unwrap();
    assert_eq!(files(&ledger), vec!["driver.md"]);
}

#[test]
fn test_bound_target_renders_once() {
    let temp = TempDir::new().unwrap();
    let generator = generator(&temp, engine(|_, ctx| Ok(ctx.target.file().to_string())));
    let model = model();
    let ledger = Ledger::new();
    let definition =
        TargetDefinition::new("Each", "${BEANNAME}.txt", "", "bean.j2", EntityScope::Each);
    let bound = build_target(
        generator.config(),
        &definition,
        generator.bundle(),
        &model,
        model.entity("Driver"),
    );

    generator
        .generate_target(&bound, &model, &selected(&["Car", "Owner"]), &ledger)
        .unwrap();
    assert_eq!(files(&ledger), vec!["Driver.txt"]);
}

#[test]
fn test_generate_bundle_in_declaration_order() {
    let temp = TempDir::new().unwrap();
    let generator = generator(&temp, engine(|_, ctx| Ok(ctx.target.name().to_string())));
    let model = model();
    let ledger = Ledger::new();
    let bundle = Bundle {
        description: None,
        targets: vec![
            TargetDefinition::new("Index", "index.txt", "", "index.j2", EntityScope::Once),
            TargetDefinition::new("Bean", "${BEANNAME}.txt", "", "bean.j2", EntityScope::Each),
        ],
    };

    generator
        .generate_bundle(&bundle, &model, &selected(&["Car", "Driver"]), &ledger)
        .unwrap();
    assert_eq!(files(&ledger), vec!["index.txt", "Car.txt", "Driver.txt"]);
}

#[test]
fn test_recursive_embedding_hits_depth_limit() {
    let temp = TempDir::new().unwrap();
    let config = RuntimeConfig::new(temp.path().join("out"), temp.path().join("templates"))
        .with_max_embedded_depth(3);
    let engine = engine(|_, ctx| {
        ctx.generator.generate("Car", "loop.txt", "loop", "loop.j2")?;
        Ok(String::new())
    });
    let generator = Generator::new(config, "garage", engine).unwrap();
    let model = model();
    let ledger = Ledger::new();
    let start = target(
        &generator,
        &model,
        TargetDefinition::new("Start", "start.txt", "", "loop.j2", EntityScope::Once),
    );

    let err = generator
        .generate_target(&start, &model, &selected(&[]), &ledger)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("depth 3"));
    assert!(ledger.is_empty());
}

#[test]
fn test_unknown_database_fails_generator_construction() {
    let temp = TempDir::new().unwrap();
    let config = RuntimeConfig::new(temp.path(), temp.path()).with_database("db2");
    let err = Generator::new(config, "b", engine(|_, _| Ok(String::new()))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
