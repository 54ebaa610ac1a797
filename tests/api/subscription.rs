use std::sync::Arc;

use eventex::app::subscription::SUBSCRIPTION_PATH;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

use crate::helper::{
    csrf_token, spawn_app, spawn_app_with_email_sender, valid_subscription, RecordingSender,
};

#[tokio::test]
async fn get_returns_the_subscription_form() {
    let app = spawn_app().await;

    let response = app.get_subscription_form().await;

    assert_eq!(200, response.status().as_u16());
    let html = response.text().await.unwrap();
    assert!(html.contains("<form"));
    assert_eq!(html.matches("<input").count(), 6);
    assert_eq!(html.matches(r#"type="text""#).count(), 3);
    assert_eq!(html.matches(r#"type="email""#).count(), 1);
    assert_eq!(html.matches(r#"type="submit""#).count(), 1);
    assert!(html.contains("csrfmiddlewaretoken"));
}

#[tokio::test]
async fn the_form_fields_are_nome_cpf_email_fone_in_order() {
    let app = spawn_app().await;

    let html = app.get_subscription_html().await;

    let positions: Vec<usize> = ["nome", "cpf", "email", "fone"]
        .iter()
        .map(|field| {
            html.find(&format!(r#"name="{}""#, field))
                .unwrap_or_else(|| panic!("The form has no {} field", field))
        })
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn the_csrf_token_is_stable_within_a_session() {
    let app = spawn_app().await;

    let first = csrf_token(&app.get_subscription_html().await);
    let second = csrf_token(&app.get_subscription_html().await);

    assert_eq!(first, second);
}

#[tokio::test]
async fn a_valid_subscription_redirects_to_the_form() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_subscription(&valid_subscription()).await;

    assert_eq!(302, response.status().as_u16());
    assert_eq!(
        response.headers().get("Location").unwrap(),
        SUBSCRIPTION_PATH
    );
}

#[tokio::test]
async fn a_valid_subscription_sends_one_confirmation_email() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.post_subscription(&valid_subscription()).await;

    let requests = app.email_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["Subject"], "Confirmação de inscrição");
    assert_eq!(body["From"], "contato@eventex.com.br");
    assert_eq!(body["To"], "contato@eventex.com.br, fabioserrones@gmail.com");

    let text = body["TextBody"].as_str().unwrap();
    for value in [
        "Fábio Serrão",
        "12345678901",
        "fabioserrones@gmail.com",
        "11-99526-3577",
    ] {
        assert!(text.contains(value), "{} is missing from the email body", value);
    }
}

#[tokio::test]
async fn the_confirmation_goes_to_the_organizer_then_the_registrant() {
    let outbox = Arc::new(RecordingSender::default());
    let app = spawn_app_with_email_sender(outbox.clone()).await;

    let response = app.post_subscription(&valid_subscription()).await;
    assert_eq!(302, response.status().as_u16());

    let sent = outbox.outbox();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from.as_ref(), "contato@eventex.com.br");
    let to: Vec<&str> = sent[0].to.iter().map(|e| e.as_ref()).collect();
    assert_eq!(to, ["contato@eventex.com.br", "fabioserrones@gmail.com"]);
}

#[tokio::test]
async fn duplicate_posts_send_duplicate_emails() {
    let outbox = Arc::new(RecordingSender::default());
    let app = spawn_app_with_email_sender(outbox.clone()).await;

    app.post_subscription(&valid_subscription()).await;
    app.post_subscription(&valid_subscription()).await;

    assert_eq!(outbox.outbox().len(), 2);
}

#[tokio::test]
async fn an_empty_post_re_renders_the_form_with_errors() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app.post_subscription(&[]).await;

    assert_eq!(200, response.status().as_u16());
    let html = response.text().await.unwrap();
    assert!(html.contains("<form"));
    assert_eq!(html.matches("Este campo é obrigatório.").count(), 4);
}

#[tokio::test]
async fn a_post_missing_any_field_is_rejected() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    for missing in ["nome", "cpf", "email", "fone"] {
        let body: Vec<_> = valid_subscription()
            .into_iter()
            .filter(|(name, _)| *name != missing)
            .collect();

        let response = app.post_subscription(&body).await;

        assert_eq!(
            200,
            response.status().as_u16(),
            "The form was not re-rendered when {} was missing.",
            missing
        );
        let html = response.text().await.unwrap();
        assert!(
            html.contains("Este campo é obrigatório."),
            "No error was shown when {} was missing.",
            missing
        );
    }
}

#[tokio::test]
async fn an_invalid_email_keeps_the_submitted_values() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let body: Vec<_> = valid_subscription()
        .into_iter()
        .map(|(name, value)| match name {
            "email" => (name, "definitely-not-an-email"),
            _ => (name, value),
        })
        .collect();

    let response = app.post_subscription(&body).await;

    assert_eq!(200, response.status().as_u16());
    let html = response.text().await.unwrap();
    assert!(html.contains("Informe um endereço de email válido."));
    assert!(html.contains(r#"value="Fábio Serrão""#));
    assert!(html.contains(r#"value="12345678901""#));
    assert!(html.contains(r#"value="definitely-not-an-email""#));
    assert!(html.contains(r#"value="11-99526-3577""#));
}

#[tokio::test]
async fn a_post_without_a_csrf_token_is_forbidden() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    // No session yet.
    let response = app
        .post_subscription_without_token(&valid_subscription())
        .await;
    assert_eq!(403, response.status().as_u16());

    // A session with a token, but the wrong one submitted.
    app.get_subscription_form().await;
    let mut body = valid_subscription();
    body.push(("csrfmiddlewaretoken", "forged"));
    let response = app.post_subscription_without_token(&body).await;
    assert_eq!(403, response.status().as_u16());
}

#[tokio::test]
async fn a_mail_failure_is_a_server_error_and_is_not_retried() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_subscription(&valid_subscription()).await;

    assert_eq!(500, response.status().as_u16());
}

#[tokio::test]
async fn the_form_shows_a_success_message_once_after_subscribing() {
    let outbox = Arc::new(RecordingSender::default());
    let app = spawn_app_with_email_sender(outbox).await;

    app.post_subscription(&valid_subscription()).await;

    let html = app.get_subscription_html().await;
    assert!(html.contains("Inscrição realizada com sucesso!"));

    let html = app.get_subscription_html().await;
    assert!(!html.contains("Inscrição realizada com sucesso!"));
}

#[tokio::test]
async fn a_repeated_field_keeps_its_last_value() {
    let outbox = Arc::new(RecordingSender::default());
    let app = spawn_app_with_email_sender(outbox.clone()).await;
    let token = csrf_token(&app.get_subscription_html().await);

    let response = app
        .post_raw_subscription(format!(
            "nome=a&nome=b&cpf=1&email=x%40y.com&fone=1&csrfmiddlewaretoken={}",
            token
        ))
        .await;

    assert_eq!(302, response.status().as_u16());
    let sent = outbox.outbox();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].text_body.contains("Nome: b\n"));
    assert_eq!(sent[0].to[1].as_ref(), "x@y.com");
}

#[tokio::test]
async fn a_malformed_post_re_renders_the_form_with_errors() {
    let outbox = Arc::new(RecordingSender::default());
    let app = spawn_app_with_email_sender(outbox.clone()).await;
    let token = csrf_token(&app.get_subscription_html().await);

    for body in [
        format!("nome=&nome=&cpf=1&unknown=x&csrfmiddlewaretoken={}", token),
        format!("nome&cpf&&=&csrfmiddlewaretoken={}", token),
    ] {
        let response = app.post_raw_subscription(body.clone()).await;

        assert_eq!(
            200,
            response.status().as_u16(),
            "The form was not re-rendered for `{}`.",
            body
        );
        let html = response.text().await.unwrap();
        assert!(html.contains("<form"));
        assert!(html.contains("Este campo é obrigatório."));
    }
    assert!(outbox.outbox().is_empty());
}

#[tokio::test]
async fn a_malformed_post_without_a_token_is_forbidden() {
    let app = spawn_app().await;
    app.get_subscription_form().await;

    let response = app
        .post_raw_subscription("nome=a&nome=b&csrfmiddlewaretoken=forged".into())
        .await;

    assert_eq!(403, response.status().as_u16());
}
