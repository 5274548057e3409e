//! CSV on disk through training, artifact, and the predictor the server uses

use std::io::Write;

use houseprice::data::HouseDataset;
use houseprice::features::RawFeatures;
use houseprice::model::ModelArtifact;
use houseprice::predict::Predictor;
use houseprice::training::Trainer;
use houseprice::{Config, FeatureVector, HouseError};

fn write_dataset(path: &std::path::Path) {
    let mut file = std::fs::File::create(path).unwrap();
    writeln!(file, "id,date,price,bedrooms,bathrooms,sqft_living,floors").unwrap();
    let rows = [(1, 1, 800), (2, 1, 1200), (3, 2, 1600), (4, 3, 2100), (5, 2, 2600)];
    for (i, (bed, bath, sqft)) in rows.iter().enumerate() {
        let price = 100_000 + 20_000 * bed + 15_000 * bath + 150 * sqft;
        writeln!(file, "{},20141013T000000,{},{},{},{},1", i, price, bed, bath, sqft).unwrap();
    }
}

fn test_config(dir: &tempfile::TempDir) -> Config {
    let mut config = Config::default();
    config.data.dataset_path = dir.path().join("data.csv").to_str().unwrap().to_string();
    config.data.model_path = dir
        .path()
        .join("model/house_price_model.json")
        .to_str()
        .unwrap()
        .to_string();
    config
}

#[test]
fn test_trained_artifact_serves_expected_price() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    write_dataset(std::path::Path::new(&config.data.dataset_path));

    let dataset = HouseDataset::load(&config.data.dataset_path).unwrap();
    let artifact = Trainer::new(&config.training).train_artifact(&dataset).unwrap();
    artifact.save(&config.data.model_path).unwrap();

    let predictor = Predictor::load(&config.data.model_path, config.limits).unwrap();
    let features = RawFeatures::new("3", "2", "1600")
        .validate(&config.limits)
        .unwrap();
    let prediction = predictor.predict(features).unwrap();
    assert!((prediction.predicted_price - 430_000.0).abs() < 1e-2);

    // The artifact on disk predicts exactly like the in-memory model
    let in_memory = artifact.model.predict(&features.to_array());
    assert_eq!(prediction.predicted_price, in_memory);
}

#[test]
fn test_retraining_same_data_gives_same_model() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    write_dataset(std::path::Path::new(&config.data.dataset_path));

    let dataset = HouseDataset::load(&config.data.dataset_path).unwrap();
    let trainer = Trainer::new(&config.training);
    let a = trainer.train_artifact(&dataset).unwrap();
    let b = trainer.train_artifact(&dataset).unwrap();
    assert_eq!(a.model, b.model);
    assert_eq!(a.evaluation, b.evaluation);
}

#[test]
fn test_serving_without_training_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let err = Predictor::load(&config.data.model_path, config.limits).unwrap_err();
    assert!(matches!(err, HouseError::NoModel(_)));
}

#[test]
fn test_hand_edited_artifact_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    write_dataset(std::path::Path::new(&config.data.dataset_path));

    let dataset = HouseDataset::load(&config.data.dataset_path).unwrap();
    let artifact = Trainer::new(&config.training).train_artifact(&dataset).unwrap();
    artifact.save(&config.data.model_path).unwrap();

    let content = std::fs::read_to_string(&config.data.model_path).unwrap();
    let tampered = content.replace("\"sqft_living\"", "\"sqft_lot\"");
    std::fs::write(&config.data.model_path, tampered).unwrap();

    let err = ModelArtifact::load(&config.data.model_path).unwrap_err();
    assert!(matches!(err, HouseError::Artifact(_)));
    assert!(Predictor::load(&config.data.model_path, config.limits).is_err());

    // Input validation still applies independently of the model
    assert_eq!(
        RawFeatures::new("3", "2", "1600").validate(&config.limits).unwrap(),
        FeatureVector::new(3, 2, 1600)
    );
}
