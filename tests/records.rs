//! Record operations against a local mock of the DNSimple API.

use std::net::TcpListener;

use dnsimple::record::CreateRecord;
use dnsimple::{Client, ClientError, Operation, RequestError};
use mockito::{Matcher, Server};
use serde_json::{Value as JsonValue, json};

const EMAIL: &str = "user@example.com";
const TOKEN: &str = "secret";

fn client(server: &Server) -> Client {
    Client::builder()
        .endpoint(&server.url().parse().unwrap())
        .email(EMAIL)
        .token(TOKEN)
        .build()
        .unwrap()
}

fn record_body() -> JsonValue {
    json!({
        "record": {
            "id": 123,
            "domain_id": 456,
            "name": "www",
            "content": "1.2.3.4",
            "record_type": "A",
            "ttl": 3600,
            "prio": 0,
            "created_at": "2014-01-15T22:08:07Z",
            "updated_at": "2014-01-15T22:08:07Z"
        }
    })
}

#[test]
fn create_record() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/domains/example.com/records")
        .match_header("x-dnsimple-token", "user@example.com:secret")
        .match_header("accept", "application/json")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "name": "www",
            "record_type": "A",
            "content": "1.2.3.4",
            "ttl": 3600
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(record_body().to_string())
        .create();

    let id = client(&server)
        .create_record(
            "example.com",
            &CreateRecord::new("www", "1.2.3.4", "A").ttl("3600"),
        )
        .unwrap();

    assert_eq!(id, "123");
    mock.assert();
}

#[test]
fn create_record_default_ttl() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/domains/42/records")
        .match_body(Matcher::Json(json!({
            "name": "",
            "record_type": "MX",
            "content": "mx.example.com"
        })))
        .with_status(201)
        .with_body(
            json!({
                "record": {
                    "id": 9000000001i64,
                    "domain_id": 42,
                    "name": "",
                    "content": "mx.example.com",
                    "record_type": "MX",
                    "ttl": 3600,
                    "prio": 10
                }
            })
            .to_string(),
        )
        .create();

    let id = client(&server)
        .create_record("42", &CreateRecord::new("", "mx.example.com", "MX").ttl(""))
        .unwrap();

    assert_eq!(id, "9000000001");
    mock.assert();
}

#[test]
fn create_record_bad_ttl_is_silent() {
    let mut server = Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();

    let id = client(&server)
        .create_record(
            "example.com",
            &CreateRecord::new("www", "1.2.3.4", "A").ttl("not-a-number"),
        )
        .unwrap();

    assert_eq!(id, "");
    mock.assert();
}

#[test]
fn create_record_api_error() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/domains/example.com/records")
        .with_status(400)
        .with_body(json!({"errors": {"content": ["can't be blank"]}}).to_string())
        .create();

    let err = client(&server)
        .create_record("example.com", &CreateRecord::new("www", "", "A"))
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::Create));
    assert_eq!(err.api_error().unwrap().status().as_u16(), 400);
    assert_eq!(
        err.to_string(),
        "error creating record: DNSimple API error: 400 Bad Request - content: can't be blank"
    );
    mock.assert();
}

#[test]
fn create_record_bad_response() {
    let mut server = Server::new();
    server
        .mock("POST", "/domains/example.com/records")
        .with_status(201)
        .with_body(r#"{"id": 123}"#)
        .create();

    let err = client(&server)
        .create_record("example.com", &CreateRecord::new("www", "1.2.3.4", "A"))
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Decode {
            operation: Operation::Create,
            ..
        }
    ));
    assert!(
        err.to_string()
            .starts_with("error parsing record response: "),
        "{err}"
    );
}

#[test]
fn destroy_record() {
    let mut server = Server::new();
    let ok = server
        .mock("DELETE", "/records/123")
        .match_header("x-dnsimple-token", "user@example.com:secret")
        .with_status(200)
        .with_body("{}")
        .create();
    let no_content = server
        .mock("DELETE", "/records/124")
        .with_status(204)
        .create();

    let client = client(&server);
    client.destroy_record("123").unwrap();
    client.destroy_record("124").unwrap();

    ok.assert();
    no_content.assert();
}

#[test]
fn destroy_record_errors() {
    let mut server = Server::new();
    server
        .mock("DELETE", "/records/9")
        .with_status(404)
        .with_body(json!({"message": "Record `9` not found"}).to_string())
        .create();
    server
        .mock("DELETE", "/records/10")
        .with_status(500)
        .with_body("oops")
        .create();

    let client = client(&server);

    let err = client.destroy_record("9").unwrap_err();
    assert_eq!(err.operation(), Some(Operation::Destroy));
    assert_eq!(
        err.to_string(),
        "error destroying record: DNSimple API error: 404 Not Found - Record `9` not found"
    );

    let err = client.destroy_record("10").unwrap_err();
    assert_eq!(err.api_error().unwrap().status().as_u16(), 500);
    assert!(
        err.to_string().starts_with(
            "error destroying record: DNSimple API error: 500 Internal Server Error - unable to get error message from \"oops\""
        ),
        "{err}"
    );
}

#[test]
fn retrieve_record() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/records/123")
        .match_header("x-dnsimple-token", "user@example.com:secret")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(record_body().to_string())
        .create();

    let record = client(&server).retrieve_record("123").unwrap();

    assert_eq!(record.id, 123);
    assert_eq!(record.domain_id, 456);
    assert_eq!(record.ttl, 3600);
    assert_eq!(record.priority, 0);
    assert_eq!(record.name, "www");
    assert_eq!(record.content, "1.2.3.4");
    assert_eq!(record.record_type, "A");
    mock.assert();
}

#[test]
fn retrieve_record_null_strings() {
    let mut server = Server::new();
    server
        .mock("GET", "/records/5")
        .with_status(200)
        .with_body(
            json!({
                "record": {"id": 5, "domain_id": 2, "name": null, "content": "1.2.3.4", "record_type": "A"}
            })
            .to_string(),
        )
        .create();

    let record = client(&server).retrieve_record("5").unwrap();

    assert_eq!(record.id, 5);
    assert_eq!(record.name, "");
    assert_eq!(record.ttl, 0);
}

#[test]
fn retrieve_record_not_found() {
    let mut server = Server::new();
    server
        .mock("GET", "/records/9")
        .with_status(404)
        .with_body(json!({"message": "Record `9` not found"}).to_string())
        .create();

    let err = client(&server).retrieve_record("9").unwrap_err();

    assert_eq!(err.operation(), Some(Operation::Retrieve));
    assert_eq!(
        err.to_string(),
        "error retrieving record: DNSimple API error: 404 Not Found - Record `9` not found"
    );
}

#[test]
fn retrieve_record_bad_response() {
    let mut server = Server::new();
    server
        .mock("GET", "/records/123")
        .with_status(200)
        .with_body(json!({"record": {"id": "abc"}}).to_string())
        .create();

    let err = client(&server).retrieve_record("123").unwrap_err();

    assert!(matches!(
        err,
        ClientError::Decode {
            operation: Operation::Retrieve,
            ..
        }
    ));
    assert!(
        err.to_string()
            .starts_with("error decoding record response: "),
        "{err}"
    );
}

#[test]
fn connection_failure() {
    let addr = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = Client::builder()
        .endpoint(&format!("http://{addr}/").parse().unwrap())
        .email(EMAIL)
        .token(TOKEN)
        .build()
        .unwrap();

    let err = client.retrieve_record("123").unwrap_err();

    assert!(matches!(
        err,
        ClientError::Request {
            operation: Operation::Retrieve,
            source: RequestError::Reqwest(_),
        }
    ));
    assert!(err.api_error().is_none());
}

#[test]
fn shared_between_threads() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/records/123")
        .with_status(200)
        .with_body(record_body().to_string())
        .expect(4)
        .create();

    let client = client(&server);
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| assert_eq!(client.retrieve_record("123").unwrap().id, 123));
        }
    });

    mock.assert();
}
