use skycast_backend::ClassificationResult;
use skycast_core::Loadable;

use super::render_loadable;

pub fn render_prediction(result: &Loadable<ClassificationResult>) -> String {
    render_loadable(result, "Classifying...", |r| {
        format!("Prediction: {}\nRainfall Probability: {}", r.class, r.rainfall)
    })
}
