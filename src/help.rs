use actix_web::{HttpRequest, HttpResponse};
use askama::Template;

#[derive(Debug, Template)]
#[template(path = "help.html")]
struct HelpPage<'a> {
    scheme: &'a str,
    host: &'a str,
}

/// Setup instructions, with hook URLs pointing back at this host.
pub async fn index(req: HttpRequest) -> HttpResponse {
    let info = req.connection_info();
    let page = HelpPage {
        scheme: info.scheme(),
        host: info.host(),
    };
    match page.render() {
        Ok(page) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(page),
        Err(err) => {
            tracing::error!("Failed to render help page: {}", err);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};

    use super::*;

    #[actix_rt::test]
    async fn serves_help_page() {
        let mut app = test::init_service(App::new().route("/", web::get().to(index))).await;
        let req = test::TestRequest::get()
            .uri("/")
            .header("host", "hooks.example.com")
            .to_request();
        let body = test::read_response(&mut app, req).await;
        let body = String::from_utf8_lossy(&body);
        assert!(body.contains("http://hooks.example.com/ghhook/push/YOUR_API_KEY"));
        assert!(body.contains("http://hooks.example.com/bbhook/push/YOUR_API_KEY/DEVICE_ID"));
    }

    #[actix_rt::test]
    async fn other_paths_are_not_found() {
        let mut app = test::init_service(App::new().route("/", web::get().to(index))).await;
        let req = test::TestRequest::get().uri("/favicon.ico").to_request();
        let resp = test::call_service(&mut app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
