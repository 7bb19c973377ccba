use axum::Json;
use axum::response::Html;

use crate::responses::Message;

pub async fn index() -> Json<Message> {
    Json(Message::new("Shelf backend is working"))
}

pub async fn health() -> Html<&'static str> {
    Html(concat!(
        "<!DOCTYPE html>",
        "<html lang='en'>",
        "<head><meta charset='UTF-8'><title>Shelf Status</title></head>",
        "<body style='font-family: sans-serif; padding: 2rem;'>",
        "<h1>Shelf Backend</h1>",
        "<p>Status: <strong style='color: green;'>OK</strong></p>",
        "<p>Message: Backend is running smoothly!</p>",
        "</body></html>"
    ))
}
