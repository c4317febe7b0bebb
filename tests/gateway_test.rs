use serde_json::json;
use turnos_rust::error::Error;
use turnos_rust::VetClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn error_body(tipo: &str, message: &str, code: u16) -> serde_json::Value {
    json!({ "error": tipo, "message": message, "code": code })
}

#[tokio::test]
async fn status_codes_map_to_error_taxonomy() {
    let cases: [(u16, &str); 6] = [
        (400, "email inválido"),
        (401, "token vencido"),
        (403, "sin permisos"),
        (404, "no existe"),
        (500, "database is locked"),
        (422, "estado desconocido"),
    ];

    for (status, message) in cases {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/duenios/1"))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(error_body("Error", message, status)),
            )
            .mount(&mock_server)
            .await;

        let api = VetClient::new(&mock_server.uri()).unwrap().api();
        let err = api.get_duenio(1).await.unwrap_err();

        match status {
            400 => assert!(matches!(err, Error::Validation(ref m) if m == message)),
            401 => assert!(matches!(err, Error::Unauthorized)),
            403 => assert!(matches!(err, Error::Forbidden)),
            404 => assert!(matches!(err, Error::NotFound)),
            500 => assert!(matches!(err, Error::Server(ref m) if m == message)),
            other => match err {
                Error::Api { status, message: m } => {
                    assert_eq!(status, other);
                    assert_eq!(m, message);
                }
                unexpected => panic!("status {other} mapped to {unexpected:?}"),
            },
        }
    }
}

#[tokio::test]
async fn unparsable_error_body_falls_back_to_raw_text() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/turnos/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>gateway boom</html>"))
        .mount(&mock_server)
        .await;

    let api = VetClient::new(&mock_server.uri()).unwrap().api();
    match api.get_turno(1).await.unwrap_err() {
        Error::Server(message) => assert!(message.contains("gateway boom")),
        other => panic!("expected Server error, got {other:?}"),
    }
}

#[tokio::test]
async fn success_without_data_is_rejected() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/turnos/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Operación exitosa"
        })))
        .mount(&mock_server)
        .await;

    let api = VetClient::new(&mock_server.uri()).unwrap().api();
    let err = api.get_turno(1).await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedResponse(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Nothing listens on this port
    let api = VetClient::new("http://127.0.0.1:9").unwrap().api();
    let err = api.get_duenio(1).await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
    assert!(err.to_string().starts_with("Connection error"));
}

#[tokio::test]
async fn search_encodes_query_parameter() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/duenios/search"))
        .and(query_param("q", "pérez chiquito"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "duenios": [] }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = VetClient::new(&mock_server.uri()).unwrap().api();
    let results = api.search_duenios("pérez chiquito").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn list_turnos_passes_filters_as_query_params() {
    use turnos_rust::api::{PageParams, TurnoListFilter};
    use turnos_rust::turnos::TurnoEstado;

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/turnos"))
        .and(query_param("estado", "pendiente"))
        .and(query_param("fecha_desde", "2024-05-01"))
        .and(query_param("fecha_hasta", "2024-05-31"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "turnos": [] }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = VetClient::new(&mock_server.uri()).unwrap().api();
    let filter = TurnoListFilter {
        page: PageParams {
            limit: Some(20),
            offset: None,
        },
        estado: Some(TurnoEstado::Pendiente),
        fecha_desde: Some("2024-05-01".to_string()),
        fecha_hasta: Some("2024-05-31".to_string()),
    };
    let turnos = api.list_turnos(filter).await.unwrap();
    assert!(turnos.is_empty());
}
