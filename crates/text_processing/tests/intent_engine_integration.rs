//! Integration tests for the intent engine (normalize -> score -> select -> extract)
//!
//! These tests exercise the public API the way an embedding chatbot would.

use std::sync::Arc;
use std::thread;

use viet_intent_config::{load_settings_from, ModelFormat};
use viet_intent_text_processing::{
    DetectionResult, EntityType, Error, IntentDefinition, IntentEngine, UNKNOWN_INTENT,
};

fn greeting_engine() -> IntentEngine {
    let engine = IntentEngine::new();
    engine
        .add_intent(
            IntentDefinition::new("greeting", ["xin chào", "chào bạn"])
                .with_threshold(0.4)
                .with_response("Xin chào! Tôi có thể giúp gì cho bạn?"),
        )
        .unwrap();
    engine
}

/// Same input, same registry, same result
#[test]
fn test_detect_is_idempotent() {
    let engine = IntentEngine::with_default_intents();
    for input in ["chào bạn nhé", "cho tôi 2 tô phở lúc 7 giờ", "???", "giá 50k"] {
        assert_eq!(engine.detect(input), engine.detect(input));
    }
}

/// Query normalizing to a registered pattern scores 1.0
#[test]
fn test_exact_match_guarantee() {
    let engine = IntentEngine::with_default_intents();
    for (input, intent) in [
        ("XIN CHÀO", "greeting"),
        ("  mấy giờ rồi ?? ", "ask_time"),
        ("Cảm ơn!", "thank_you"),
        ("hẹn gặp lại", "goodbye"),
    ] {
        let result = engine.detect(input);
        assert_eq!(result.intent, intent, "input: {}", input);
        assert_eq!(result.confidence, 1.0);
    }
}

/// Identical patterns: registration order decides
#[test]
fn test_exact_match_registration_order() {
    let engine = IntentEngine::new();
    engine.add_intent(IntentDefinition::new("first", ["xin chào"])).unwrap();
    engine.add_intent(IntentDefinition::new("second", ["xin chào"])).unwrap();

    let result = engine.detect("xin chào");
    assert_eq!(result.intent, "first");
    assert_eq!(result.alternatives[0].intent, "second");
}

#[test]
fn test_threshold_respected() {
    let engine = IntentEngine::new();
    engine
        .add_intent(IntentDefinition::new("greeting", ["xin chào", "chào bạn"]).with_threshold(0.9))
        .unwrap();

    for (name, breakdown) in engine.score_all("chào bạn nhé") {
        assert_eq!(name, "greeting");
        assert!(breakdown.combined < 0.9);
    }

    let result = engine.detect("chào bạn nhé");
    assert_eq!(result.intent, UNKNOWN_INTENT);
    assert_eq!(result.confidence, 0.0);
    assert!(result.response_template.is_empty());
    assert_eq!(result.best_guess.unwrap().intent, "greeting");
}

#[test]
fn test_diacritic_invariance() {
    let engine = IntentEngine::with_default_intents();
    for (accented, plain) in [
        ("xin chào", "xin chao"),
        ("tôi muốn đặt món", "toi muon dat mon"),
        ("giá bao nhiêu", "gia bao nhieu"),
        ("tạm biệt", "tam biet"),
    ] {
        assert_eq!(engine.detect(accented).intent, engine.detect(plain).intent);
    }
}

#[test]
fn test_fresh_engine_returns_unknown() {
    let engine = IntentEngine::new();
    let result = engine.detect("anything");
    assert_eq!(result, DetectionResult::unknown(Default::default()));
    assert!(result.entities.is_empty());
}

#[test]
fn test_entities_independent_of_intent() {
    let check = |result: &DetectionResult| {
        let price = &result.entities["price"];
        assert_eq!(price.entity_type, EntityType::Price);
        assert_eq!(price.value, "50");
        assert_eq!(price.unit.as_deref(), Some("k"));
        assert_eq!(price.amount(), Some(50_000.0));
    };

    // no intents at all
    check(&IntentEngine::new().detect("giá 50k"));

    // with intents, whichever wins
    let result = IntentEngine::with_default_intents().detect("giá 50k");
    check(&result);
}

#[test]
fn test_greeting_scenario() {
    let result = greeting_engine().detect("chào bạn nhé");
    assert_eq!(result.intent, "greeting");
    assert!(result.confidence >= 0.4);
    assert!(result.confidence < 1.0);
    assert_eq!(result.response_template, "Xin chào! Tôi có thể giúp gì cho bạn?");
}

#[test]
fn test_ask_price_keyword_scenario() {
    let engine = IntentEngine::new();
    engine
        .add_intent(
            IntentDefinition::new("ask_price", ["phí vận chuyển"])
                .with_keywords(["giá", "bao nhiêu"])
                .with_threshold(0.3),
        )
        .unwrap();

    let breakdown = engine.score_all("giá bánh mì bao nhiêu")[0].1;
    assert_eq!(breakdown.pattern_signal, 0.0);
    assert_eq!(breakdown.keyword_signal, 1.0);

    let result = engine.detect("giá bánh mì bao nhiêu");
    assert_eq!(result.intent, "ask_price");
    assert_eq!(result.entities["food_item"].value, "bánh mì");
}

#[test]
fn test_registration_errors_leave_registry_intact() {
    let engine = greeting_engine();

    assert_eq!(
        engine.add_intent(IntentDefinition::new("greeting", ["chào"])).unwrap_err(),
        Error::DuplicateIntent("greeting".to_string())
    );
    assert!(matches!(
        engine.add_intent(IntentDefinition::new("empty", Vec::<String>::new())),
        Err(Error::InvalidConfig { .. })
    ));
    assert!(matches!(
        engine.add_intent(IntentDefinition::new("loose", ["ok"]).with_threshold(1.01)),
        Err(Error::InvalidConfig { .. })
    ));

    assert_eq!(engine.intent_names(), vec!["greeting"]);
    assert_eq!(engine.detect("xin chào").confidence, 1.0);
}

#[test]
fn test_concurrent_detect() {
    let engine = Arc::new(IntentEngine::with_default_intents());
    let expected = engine.detect("giá bánh mì bao nhiêu");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                (0..200)
                    .map(|_| engine.detect("giá bánh mì bao nhiêu"))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for result in handle.join().unwrap() {
            assert_eq!(result, expected);
        }
    }
}

#[test]
fn test_concurrent_detect_and_register() {
    let engine = Arc::new(IntentEngine::with_default_intents());

    let writer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for i in 0..50 {
                engine
                    .add_intent(IntentDefinition::new(format!("extra_{}", i), [format!("câu số {}", i)]))
                    .unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..100 {
                    assert_eq!(engine.detect("xin chào").intent, "greeting");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(engine.len(), 56);
}

#[test]
fn test_result_outlives_engine() {
    let result = {
        let engine = IntentEngine::with_default_intents();
        engine.detect("cho tôi hai tô phở bò")
    };
    assert_eq!(result.entities["quantity"].value, "2");
    assert_eq!(result.entities["food_item"].value, "phở bò");
}

#[test]
fn test_initialize_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("intents.yaml");
    std::fs::write(
        &path,
        r#"
greeting:
  patterns: ["xin chào", "chào bạn"]
  keywords: ["chào"]
  threshold: 0.3
  response: "Xin chào!"
ask_price:
  patterns: ["giá bao nhiêu"]
  keywords: ["giá", "bao nhiêu"]
  gazetteer:
    product: ["nón lá"]
broken:
  keywords: ["x"]
too_strict:
  patterns: ["x"]
  threshold: 2
"#,
    )
    .unwrap();

    let engine = IntentEngine::new();
    assert!(engine.initialize_from_path(&path));
    assert_eq!(engine.intent_names(), vec!["greeting", "ask_price"]);

    let skipped: Vec<String> = engine.load_warnings().into_iter().map(|w| w.intent).collect();
    assert_eq!(skipped, vec!["broken", "too_strict"]);

    let result = engine.detect("nón lá giá bao nhiêu");
    assert_eq!(result.intent, "ask_price");
    assert_eq!(result.entities["product"].value, "nón lá");
    assert_eq!(engine.get_intent("ask_price").unwrap().threshold, None);
}

#[test]
fn test_initialize_failure_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();

    let engine = IntentEngine::with_default_intents();
    assert!(!engine.initialize_from_path(dir.path().join("missing.json")));
    assert!(engine.is_empty());
    assert!(engine.detect("xin chào").is_unknown());

    let engine = IntentEngine::with_default_intents();
    assert!(!engine.initialize_from_str("- just\n- a list\n", ModelFormat::Yaml));
    assert!(engine.is_empty());
}

#[test]
fn test_engine_from_settings_dir() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    std::fs::write(
        &model_path,
        r#"{"greeting": {"patterns": ["chào sếp"], "response": "Chào sếp!"}}"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("default.toml"),
        format!(
            "[engine]\ndefault_threshold = 0.5\n\n[model]\npath = {:?}\nload_defaults = true\n",
            model_path.to_string_lossy()
        ),
    )
    .unwrap();

    let settings = load_settings_from(dir.path(), None).unwrap();
    let engine = IntentEngine::from_settings(&settings).unwrap();

    // the model's greeting replaces the built-in one; other built-ins follow
    let names = engine.intent_names();
    assert_eq!(names[0], "greeting");
    assert_eq!(names.len(), 6);
    assert_eq!(engine.detect("chào sếp").response_template, "Chào sếp!");
    assert_eq!(engine.settings().default_threshold, 0.5);
}
