use skycast_backend::WeatherImage;

use super::render_loadable;
use crate::services::HomeContent;

pub fn render_home(content: &HomeContent) -> String {
    let fact = render_loadable(&content.fact, "Loading weather fact...", |f| f.fact.clone());
    let image = render_loadable(&content.image, "Generating image...", describe_image);
    format!("Weather fact: {}\n{}", fact, image)
}

fn describe_image(image: &WeatherImage) -> String {
    match &image.caption {
        Some(caption) if !caption.trim().is_empty() => {
            format!("Image: {} bytes ({})", image.bytes.len(), caption.trim())
        }
        _ => format!("Image: {} bytes", image.bytes.len()),
    }
}
