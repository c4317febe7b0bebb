use serde_json::json;
use turnos_rust::VetClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn duenio_json(id: i64, nombre: &str) -> serde_json::Value {
    json!({
        "id": id,
        "nombre_apellido": nombre,
        "telefono": format!("11{id}{id}{id}{id}"),
        "email": format!("{}@example.com", nombre.to_lowercase().replace(' ', ".")),
        "direccion": "Calle Falsa 123",
        "created_at": "2024-04-01T09:00:00",
        "updated_at": "2024-04-01T09:00:00"
    })
}

fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({
        "success": true,
        "message": "Operación exitosa",
        "timestamp": "2024-04-01T09:00:00",
        "data": data
    })
}

#[tokio::test]
async fn fetch_all_unwraps_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/duenios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "duenios": [duenio_json(1, "Ana Gomez"), duenio_json(2, "Bruno Paz")]
        }))))
        .mount(&mock_server)
        .await;

    let client = VetClient::new(&mock_server.uri()).unwrap();
    let mut store = client.duenios();
    store.fetch_all().await;

    assert_eq!(store.total(), 2);
    assert_eq!(store.duenios()[0].nombre_apellido, "Ana Gomez");
    assert!(!store.has_error());
    assert!(!store.is_loading());
}

#[tokio::test]
async fn fetch_all_failure_sets_error_and_empties_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/duenios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "duenios": [duenio_json(1, "Ana Gomez")]
        }))))
        .mount(&mock_server)
        .await;

    let client = VetClient::new(&mock_server.uri()).unwrap();
    let mut store = client.duenios();
    store.fetch_all().await;
    assert_eq!(store.total(), 1);

    mock_server.reset().await;
    Mock::given(method("GET"))
        .and(path("/duenios"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Error interno",
            "message": "database is locked",
            "code": 500
        })))
        .mount(&mock_server)
        .await;

    store.fetch_all().await;
    assert_eq!(store.total(), 0, "a failed refresh must not keep stale data");
    assert!(store.has_error());
    assert!(store.error().unwrap().contains("Internal server error"));
    assert!(!store.is_loading());
}

#[tokio::test]
async fn create_pushes_record_and_selects_it() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/duenios"))
        .respond_with(ResponseTemplate::new(201).set_body_json(envelope(json!({
            "duenio": duenio_json(5, "Carla Ruiz")
        }))))
        .mount(&mock_server)
        .await;

    let client = VetClient::new(&mock_server.uri()).unwrap();
    let mut store = client.duenios();

    let created = store
        .create(turnos_rust::duenios::CreateDuenioPayload {
            nombre_apellido: "Carla Ruiz".to_string(),
            telefono: "115555".to_string(),
            email: "carla@example.com".to_string(),
            direccion: "Calle Falsa 123".to_string(),
        })
        .await;

    assert_eq!(created.unwrap().id, Some(5));
    assert_eq!(store.total(), 1);
    assert_eq!(store.current().unwrap().id, Some(5));
    assert!(!store.has_error());
}

#[tokio::test]
async fn remove_drops_record_and_clears_current() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/duenios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "duenios": [duenio_json(1, "Ana Gomez"), duenio_json(2, "Bruno Paz")]
        }))))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/duenios/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "duenio": duenio_json(1, "Ana Gomez")
        }))))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/duenios/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .mount(&mock_server)
        .await;

    let client = VetClient::new(&mock_server.uri()).unwrap();
    let mut store = client.duenios();
    store.fetch_all().await;
    store.fetch_one(1).await;
    assert_eq!(store.current().unwrap().id, Some(1));

    assert!(store.remove(1).await);
    assert_eq!(store.total(), 1);
    assert_eq!(store.duenios()[0].id, Some(2));
    assert!(store.find_by_id(1).is_none());
    assert!(store.current().is_none());
}

#[tokio::test]
async fn update_replaces_cached_entry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/duenios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "duenios": [duenio_json(1, "Ana Gomez")]
        }))))
        .mount(&mock_server)
        .await;

    let mut actualizado = duenio_json(1, "Ana Gomez");
    actualizado["telefono"] = json!("116666");
    Mock::given(method("PUT"))
        .and(path("/duenios/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "duenio": actualizado
        }))))
        .mount(&mock_server)
        .await;

    let client = VetClient::new(&mock_server.uri()).unwrap();
    let mut store = client.duenios();
    store.fetch_all().await;

    let updated = store
        .update(
            1,
            turnos_rust::duenios::UpdateDuenioPayload {
                telefono: Some("116666".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert_eq!(updated.unwrap().telefono, "116666");
    assert_eq!(store.find_by_id(1).unwrap().telefono, "116666");
}

#[tokio::test]
async fn blank_search_issues_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/duenios/search"))
        .and(query_param("q", "ana"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "duenios": [duenio_json(1, "Ana Gomez")]
        }))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = VetClient::new(&mock_server.uri()).unwrap();
    let mut store = client.duenios();

    store.search("ana").await;
    assert_eq!(store.search_results().len(), 1);

    // Blank query clears the previous results locally
    store.search("   ").await;
    assert!(store.search_results().is_empty());
    assert!(!store.has_error());
}

#[tokio::test]
async fn search_failure_surfaces_classified_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/duenios/search"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "No encontrado",
            "message": "sin resultados",
            "code": 404
        })))
        .mount(&mock_server)
        .await;

    let client = VetClient::new(&mock_server.uri()).unwrap();
    let mut store = client.duenios();
    store.search("nadie").await;

    assert!(store.search_results().is_empty());
    assert_eq!(store.error().unwrap(), "Resource not found");
}
