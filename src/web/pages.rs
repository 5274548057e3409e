//! HTML for the estimate form and result page

use crate::features::RawFeatures;
use crate::predict::format_price;
use crate::Prediction;

const STYLE: &str = "body{font-family:sans-serif;max-width:32rem;margin:3rem auto}\
label{display:block;margin:.6rem 0}input{width:100%}\
.error{color:#b00020}.price{font-size:1.6rem;font-weight:bold}";

/// The input form, optionally pre-filled and with an error message
pub fn render_form(values: Option<&RawFeatures>, error: Option<&str>) -> String {
    let empty = RawFeatures::default();
    let values = values.unwrap_or(&empty);
    let error = error
        .map(|e| format!("<p class=\"error\">{}</p>", escape(e)))
        .unwrap_or_default();
    layout(&format!("{}{}", error, form(values)))
}

/// The form followed by the predicted price
pub fn render_result(values: &RawFeatures, prediction: &Prediction) -> String {
    let result = format!(
        "<p>Estimated price for {}:</p>\
         <p class=\"price\" id=\"predicted_price\">{}</p>",
        escape(&prediction.features.to_string()),
        format_price(prediction.predicted_price)
    );
    layout(&format!("{}{}", result, form(values)))
}

fn form(values: &RawFeatures) -> String {
    format!(
        "<form method=\"post\" action=\"/analysis\">\
         <label>Bedrooms <input name=\"bedrooms\" inputmode=\"numeric\" value=\"{}\"></label>\
         <label>Bathrooms <input name=\"bathrooms\" inputmode=\"numeric\" value=\"{}\"></label>\
         <label>Living area (sqft) <input name=\"sqft_living\" inputmode=\"numeric\" value=\"{}\"></label>\
         <button type=\"submit\">Estimate</button>\
         </form>",
        escape(&values.bedrooms),
        escape(&values.bathrooms),
        escape(&values.sqft_living)
    )
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>House Price Estimator</title><style>{}</style></head>\
         <body><h1>House Price Estimator</h1>{}</body></html>",
        STYLE, body
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
