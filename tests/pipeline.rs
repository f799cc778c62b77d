use pairprep::config::PrepConfig;
use pairprep::data::model::{LabeledPair, PairTable, Record, RecordTable, Value};
use pairprep::{generate_examples, split_table, trim_tables, PrepError};
use serde_json::json;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn priced_table(prices: &[f64]) -> RecordTable {
    RecordTable::new(
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| Record::new(i as i64).with("price", p))
            .collect(),
    )
    .unwrap()
}

// -------------------------------------------------------------------------
// End-to-end
// -------------------------------------------------------------------------

#[test]
fn single_matching_pair() -> anyhow::Result<()> {
    init_logging();
    let ltable = priced_table(&[10.0, 20.0, 30.0]);
    let rtable = priced_table(&[10.0, 25.0, 30.0]);
    let pairs = PairTable::new("label", vec![LabeledPair::new(0, 0, 1)]);

    let (examples, labels) = generate_examples(&pairs, &ltable, &rtable, "label")?;
    assert_eq!(examples, vec![[0.0]]);
    assert_eq!(labels, vec![1]);
    Ok(())
}

#[test]
fn trim_split_extract_from_json() -> anyhow::Result<()> {
    init_logging();
    let ltable = RecordTable::from_json_records(&json!([
        {"id": 10, "title": "usb-c cable 1m", "price": 9.99},
        {"id": 11, "title": "usb-c cable 2m", "price": 12.5},
        {"id": 12, "title": "wall charger", "price": "- na -"},
        {"id": 13, "title": "unused", "price": 1.0}
    ]))?;
    let rtable = RecordTable::from_json_records(&json!([
        {"id": 40, "name": "cable usb c 1 m", "price": 9.99},
        {"id": 41, "name": "usb c cable 2m", "price": 11.5},
        {"id": 42, "name": "charger", "price": 20},
        {"id": 43, "name": "unused", "price": null}
    ]))?;
    let pairs = PairTable::from_json_records(
        &json!([
            {"ltable_id": 10, "rtable_id": 40, "gold": 1},
            {"ltable_id": 11, "rtable_id": 41, "gold": 1},
            {"ltable_id": 12, "rtable_id": 42, "gold": 1},
            {"ltable_id": 10, "rtable_id": 41, "gold": 0}
        ]),
        "gold",
    )?;

    let (pairs, ltable, rtable) = trim_tables(&pairs, &ltable, &rtable)?.into_tables();
    assert_eq!(ltable.len(), 3);
    assert_eq!(rtable.len(), 3);
    assert_eq!(ltable.ids().collect::<Vec<_>>(), vec![0, 1, 2]);

    let (train, valid) = split_table(&pairs, 0.5, false)?;
    assert_eq!(train.len(), 2);
    assert_eq!(valid.len(), 2);

    let (examples, labels) = generate_examples(&train, &ltable, &rtable, "gold")?;
    assert_eq!(labels, vec![1, 1]);
    assert_eq!(examples[0], [0.0]);
    assert!((examples[1][0] - 1.0 / 12.0).abs() < 1e-12);

    let (examples, labels) = generate_examples(&valid, &ltable, &rtable, "gold")?;
    assert_eq!(labels, vec![1, 0]);
    assert_eq!(examples[0], [-1.0]);
    Ok(())
}

#[test]
fn configured_pipeline() -> anyhow::Result<()> {
    init_logging();
    let config = PrepConfig::from_toml(
        r#"
label_field = "is_match"

[features]
price_column = "cost"
null_markers = ["?"]

[split]
fraction = 0.5
seed = 5
"#,
    )?;

    let ltable = RecordTable::new(vec![
        Record::new(0).with("cost", 4.0),
        Record::new(1).with("cost", "?"),
    ])?;
    let rtable = RecordTable::new(vec![Record::new(0).with("cost", 4.0)])?;
    let pairs = PairTable::new(
        config.label_field.clone(),
        vec![
            LabeledPair::new(0, 0, 1),
            LabeledPair::new(1, 0, 0),
            LabeledPair::new(0, 0, 1),
            LabeledPair::new(1, 0, 0),
        ],
    );

    let (train, valid) = config.split(&pairs)?;
    assert_eq!(train.len() + valid.len(), 4);

    let builder = config.feature_builder();
    let (examples, labels) = pairprep::extract::generate_examples_with(
        &builder,
        &train,
        &ltable,
        &rtable,
        &config.label_field,
    )?;
    for (features, label) in examples.iter().zip(&labels) {
        let expected = if *label == 1 { 0.0 } else { -1.0 };
        assert_eq!(features[0], expected);
    }
    Ok(())
}

// -------------------------------------------------------------------------
// Failure paths
// -------------------------------------------------------------------------

#[test]
fn record_missing_price_column() {
    let ltable = RecordTable::new(vec![Record::new(0).with("title", "x")]).unwrap();
    let rtable = priced_table(&[1.0]);
    let pairs = PairTable::new("label", vec![LabeledPair::new(0, 0, 1)]);

    let err = generate_examples(&pairs, &ltable, &rtable, "label").unwrap_err();
    assert!(matches!(err, PrepError::MissingAttribute { .. }));
    assert_eq!(err.to_string(), "record has no 'price' attribute");
}

#[test]
fn pairs_referencing_absent_ids() {
    let ltable = priced_table(&[1.0, 2.0]);
    let rtable = priced_table(&[1.0]);
    let pairs = PairTable::new("label", vec![LabeledPair::new(5, 0, 1)]);

    let err = trim_tables(&pairs, &ltable, &rtable).unwrap_err();
    assert_eq!(err.to_string(), "left table has no record with id 5");

    let err = generate_examples(&pairs, &ltable, &rtable, "label").unwrap_err();
    assert!(matches!(err, PrepError::RecordNotFound { id: 5, .. }));
}

#[test]
fn pair_data_merges_records() {
    let ltable = RecordTable::new(vec![Record::new(1).with("price", 2.0).with("a", 1i64)]).unwrap();
    let rtable = RecordTable::new(vec![Record::new(9).with("price", 2.0).with("b", 2i64)]).unwrap();

    let data =
        pairprep::get_data_from_ids(1, 9, &ltable, &rtable, Some(("label", Value::Integer(1))))
            .unwrap();
    assert_eq!(data.features, [0.0]);
    let keys: Vec<_> = data.attributes.keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "b", "id", "label", "price"]);
    assert_eq!(data.attributes.get("id"), Some(&Value::Integer(9)));
}
