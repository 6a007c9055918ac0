use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD,
    CONTENT_DISPOSITION, CONTENT_TYPE, ORIGIN,
};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use sign_recipes::ai::{AiProviders, FakeProvider};
use sign_recipes::repository::DieselRepository;
use sign_recipes::routes;

mod common;

const BOUNDARY: &str = "----signrecipesboundary";

const RECIPE_RESPONSE: &str = r#"{
    "product_match": {"product_code": "PRD-0001", "product_name": "Banner A", "category": "Banners", "confidence": 0.8},
    "recipe": [
        {"recipe_section": "Material", "sequence": 1, "process_material_code": "MAT-PVC-440", "process_name": "PVC", "work_instruction": "Cut", "discipline": "Materials"},
        {"recipe_section": "Process", "sequence": 2, "parent_sequence": 1, "process_material_code": "PRC-PRINT", "process_name": "Print", "work_instruction": "Print", "discipline": "Print"}
    ]
}"#;

fn multipart_body(files: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (field, content) in files {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{field}.csv\"\r\nContent-Type: text/csv\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

fn providers(response: &str) -> AiProviders {
    let fake = Arc::new(FakeProvider::new("fake").with_default_response(response));
    AiProviders::new(fake.clone(), fake)
}

macro_rules! app {
    ($test_db:expr, $providers:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(DieselRepository::new($test_db.pool())))
                .app_data(web::Data::new($providers))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_upload_chat_download_flow() {
    let test_db = common::TestDb::new("test_upload_chat_download_flow.db");
    let app = app!(test_db, providers(RECIPE_RESPONSE));

    let body = multipart_body(&[
        (
            "products_file",
            "Product Code,Product Name,Category,Short Description\nPRD-0001,Banner A,Banners,PVC banner\n",
        ),
        (
            "materials_file",
            "partcode,friendly_description,base,thk\nMAT-PVC-440,PVC 440gsm,PVC,0.5\nMAT-EYE,Eyelets,Hardware,\n",
        ),
        (
            "processes_file",
            "sortID,parentID,PROC_CODE,PROC_NAME,DISCIPLINE\n1,0,PRC-PRINT,Print,Print\n",
        ),
    ]);
    let req = test::TestRequest::post()
        .uri("/upload-data")
        .insert_header((
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
        .to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        resp,
        json!({"message": "Data uploaded successfully", "products": 1, "materials": 2, "processes": 1})
    );

    let req = test::TestRequest::get().uri("/products").to_request();
    let products: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(products[0]["product_code"], "PRD-0001");
    assert_eq!(products[0]["short_description"], "PVC banner");

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(json!({"message": "I need a banner", "provider": "claude"}))
        .to_request();
    let chat: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(chat["recipe"]["total_materials"], 1);
    assert_eq!(chat["recipe"]["total_processes"], 1);
    assert_eq!(chat["recipe"]["product"]["product_code"], "PRD-0001");
    assert!(chat["session_id"].as_str().unwrap().starts_with("session_"));

    let req = test::TestRequest::get()
        .uri("/recipe/PRD-0001/download")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()
            .get(CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    assert!(
        resp.headers()
            .get(CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("Banner_A_recipe.csv")
    );
    let csv = test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&csv).lines().count(), 3);

    let req = test::TestRequest::get().uri("/stats").to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        stats,
        json!({"products": 1, "materials": 2, "processes": 1, "recipes": 2, "chat_sessions": 1})
    );
}

#[actix_web::test]
async fn test_upload_with_missing_column_is_bad_request() {
    let test_db = common::TestDb::new("test_upload_missing_column.db");
    let app = app!(test_db, providers(RECIPE_RESPONSE));

    let body = multipart_body(&[
        ("products_file", "Product Name\nBanner A\n"),
        ("materials_file", "partcode\nMAT-PVC\n"),
        ("processes_file", "PROC_CODE,PROC_NAME\nPRC-PRINT,Print\n"),
    ]);
    let req = test::TestRequest::post()
        .uri("/upload-data")
        .insert_header((
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("Product Code"));
}

#[actix_web::test]
async fn test_download_without_recipe_is_not_found() {
    let test_db = common::TestDb::new("test_download_without_recipe.db");
    let app = app!(test_db, providers(RECIPE_RESPONSE));

    let req = test::TestRequest::get()
        .uri("/recipe/PRD-9999/download")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Not found");
}

#[actix_web::test]
async fn test_chat_with_malformed_provider_output_is_bad_gateway() {
    let test_db = common::TestDb::new("test_chat_malformed_output.db");
    let app = app!(test_db, providers("I cannot help with that."));

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(json!({"message": "banner"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn test_chat_with_empty_message_is_bad_request() {
    let test_db = common::TestDb::new("test_chat_empty_message.db");
    let app = app!(test_db, providers(RECIPE_RESPONSE));

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(json!({"message": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_chat_with_unknown_provider_is_json_bad_request() {
    let test_db = common::TestDb::new("test_chat_unknown_provider.db");
    let app = app!(test_db, providers(RECIPE_RESPONSE));

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(json!({"message": "banner", "provider": "gemini"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("gemini"));
}

#[actix_web::test]
async fn test_chat_with_non_json_body_is_json_bad_request() {
    let test_db = common::TestDb::new("test_chat_non_json_body.db");
    let app = app!(test_db, providers(RECIPE_RESPONSE));

    let req = test::TestRequest::post()
        .uri("/chat")
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("message=banner")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].is_string());
}

#[actix_web::test]
async fn test_upload_with_missing_file_is_json_bad_request() {
    let test_db = common::TestDb::new("test_upload_missing_file.db");
    let app = app!(test_db, providers(RECIPE_RESPONSE));

    let body = multipart_body(&[
        ("products_file", "Product Code,Product Name\nPRD-0001,Banner A\n"),
        ("materials_file", "partcode\nMAT-PVC\n"),
    ]);
    let req = test::TestRequest::post()
        .uri("/upload-data")
        .insert_header((
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].is_string());

    let req = test::TestRequest::get().uri("/stats").to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["products"], 0);
}

#[actix_web::test]
async fn test_cors_preflight_allows_configured_origin() {
    let test_db = common::TestDb::new("test_cors_preflight.db");
    let app = test::init_service(
        App::new()
            .wrap(routes::cors("http://localhost:3000"))
            .app_data(web::Data::new(DieselRepository::new(test_db.pool())))
            .app_data(web::Data::new(providers(RECIPE_RESPONSE)))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/chat")
        .insert_header((ORIGIN, "http://localhost:3000"))
        .insert_header((ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        resp.headers().get(ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );

    let req = test::TestRequest::get()
        .uri("/stats")
        .insert_header((ORIGIN, "http://localhost:3000"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
}
