// Shared fixtures: a wiremock stand-in for the Quran API and JSON builders
// shaped like its responses.

use mushaf::{QuranClient, Settings};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub fn chapter_json(id: u32, name: &str, verses_count: u32) -> Value {
    json!({
        "id": id,
        "revelation_place": if id == 2 { "madinah" } else { "makkah" },
        "revelation_order": id,
        "bismillah_pre": id != 1,
        "name_simple": name,
        "name_complex": name,
        "name_arabic": "الفاتحة",
        "verses_count": verses_count,
        "pages": [1, 1],
        "translated_name": { "language_name": "english", "name": format!("{name} (en)") }
    })
}

#[allow(dead_code)]
pub fn verse_json(chapter: u32, n: u32, translation: Option<&str>) -> Value {
    let translations = match translation {
        Some(t) => json!([{ "id": n, "resource_id": 33, "text": t }]),
        None => json!([]),
    };
    json!({
        "id": n,
        "verse_number": n,
        "verse_key": format!("{chapter}:{n}"),
        "text_uthmani": format!("نص {n}"),
        "translations": translations,
    })
}

#[allow(dead_code)]
pub fn verses_page(verses: Vec<Value>, next_page: Option<u32>) -> Value {
    json!({
        "verses": verses,
        "pagination": {
            "per_page": 50, "current_page": 1, "next_page": next_page,
            "total_pages": 1, "total_records": 7
        }
    })
}

/// `/chapters` with Al-Fatihah and Al-Baqarah.
#[allow(dead_code)]
pub async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/chapters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chapters": [chapter_json(1, "Al-Fatihah", 7), chapter_json(2, "Al-Baqarah", 286)]
        })))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_chapter(server: &MockServer, id: u32, name: &str, count: u32) {
    Mock::given(method("GET"))
        .and(path(format!("/chapters/{id}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "chapter": chapter_json(id, name, count) })),
        )
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_verses(server: &MockServer, id: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/verses/by_chapter/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_status(server: &MockServer, at: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> QuranClient {
    QuranClient::new(&Settings::with_api_base(server.uri())).expect("client builds")
}
