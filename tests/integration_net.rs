// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the HTTP fetcher using wiremock.

use init_repo::error::{InitError, NetworkError};
use init_repo::net::Fetcher;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_string_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/acme/manifest/main/default.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<manifest/>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/acme/manifest/main/default.xml", mock_server.uri());
    let body = Fetcher::new().url(&url).fetch_string().await.unwrap();

    assert_eq!(body, "<manifest/>");
}

#[tokio::test]
async fn test_fetch_sends_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = Fetcher::new()
        .url(mock_server.uri())
        .fetch_string()
        .await
        .unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_fetch_string_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing.xml", mock_server.uri());
    let err = Fetcher::new().url(&url).fetch_string().await.unwrap_err();

    match err {
        InitError::Network(e) => match *e {
            NetworkError::HttpError { status, url: failed } => {
                assert_eq!(status, 404);
                assert_eq!(failed, url);
            }
            other => panic!("expected HttpError, got {other:?}"),
        },
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_string_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = Fetcher::new()
        .url(format!("{}/default.xml", mock_server.uri()))
        .fetch_string()
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("network error: http error 500"));
}

#[tokio::test]
async fn test_fetch_without_url() {
    let err = Fetcher::new().fetch_string().await.unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"network error: invalid url: no URL provided");
}
