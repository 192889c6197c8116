use crate::models::app_state::SpeechSettings;
use crate::models::feedback_models::ErrorView;

const LAYOUT_HEAD: &str = "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">";

pub fn render_index(speech: &SpeechSettings) -> String {
    format!(
        "{LAYOUT_HEAD}<title>Customer Feedback</title></head><body>\
<main>\
<h1>Tell us how we did</h1>\
<form method=\"post\" action=\"/\">\
<label for=\"email\">Email</label>\
<input type=\"email\" id=\"email\" name=\"email\">\
<label for=\"feedback\">Feedback</label>\
<textarea id=\"feedback\" name=\"feedback\" rows=\"6\"></textarea>\
<button type=\"button\" id=\"dictate\">Dictate</button>\
<button type=\"submit\">Send feedback</button>\
</form>\
</main>\
<script src=\"https://aka.ms/csspeech/jsbrowserpackageraw\"></script>\
<script>\
const speechKey = {key};\
const speechRegion = {region};\
document.getElementById(\"dictate\").addEventListener(\"click\", () => {{\
const config = SpeechSDK.SpeechConfig.fromSubscription(speechKey, speechRegion);\
const audio = SpeechSDK.AudioConfig.fromDefaultMicrophoneInput();\
const recognizer = new SpeechSDK.SpeechRecognizer(config, audio);\
recognizer.recognizeOnceAsync(result => {{\
const box = document.getElementById(\"feedback\");\
box.value = (box.value + \" \" + result.text).trim();\
recognizer.close();\
}}, () => recognizer.close());\
}});\
</script>\
</body></html>",
        key = script_string(&speech.key),
        region = script_string(&speech.region),
    )
}

pub fn render_error(view: &ErrorView) -> String {
    let request_id = if view.show_request_id() {
        format!(
            "<p><strong>Request ID:</strong> <code>{}</code></p>",
            escape_html(&view.request_id)
        )
    } else {
        String::new()
    };
    format!(
        "{LAYOUT_HEAD}<title>Error - Customer Feedback</title></head><body>\
<main>\
<h1>Error.</h1>\
<h2>An error occurred while processing your request.</h2>\
{request_id}\
<p><a href=\"/\">Back to the feedback form</a></p>\
</main>\
</body></html>"
    )
}

/// JSON string literal that cannot close the surrounding script element.
fn script_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
