use gallery_common::storage::ContentHash;
use reqwest::Method;
use reqwest::multipart::Form;

use crate::common::{TestApp, file_part, pdf_bytes, png_bytes, routes};

fn cv_form(bytes: Vec<u8>) -> Form {
    Form::new().part("file", file_part(bytes, "Jane Doe CV.pdf", "application/pdf"))
}

fn headshot_form(bytes: Vec<u8>) -> Form {
    Form::new().part("file", file_part(bytes, "portrait.png", "image/png"))
}

mod cv {
    use super::*;

    #[tokio::test]
    async fn upload_then_download() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .multipart_with_token(Method::POST, routes::ADMIN_CV, cv_form(pdf_bytes("v1")), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["kind"], "cv");
        assert_eq!(res.body["filename"], "Jane Doe CV.pdf");
        assert_eq!(res.body["content_type"], "application/pdf");
        assert_eq!(res.body["size"], pdf_bytes("v1").len());
        assert_eq!(res.body["url"], routes::ABOUT_CV);

        let file = app.get(routes::ABOUT_CV).await;
        assert_eq!(file.status, 200);
        assert_eq!(file.bytes, pdf_bytes("v1"));
        assert_eq!(file.header("content-type"), Some("application/pdf"));
        assert!(
            file.header("content-disposition")
                .is_some_and(|v| v.contains("Jane%20Doe%20CV.pdf")),
            "{:?}",
            file.header("content-disposition")
        );
    }

    #[tokio::test]
    async fn replacing_releases_the_previous_file() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        app.multipart_with_token(Method::POST, routes::ADMIN_CV, cv_form(pdf_bytes("v1")), &token)
            .await;
        let res = app
            .multipart_with_token(Method::POST, routes::ADMIN_CV, cv_form(pdf_bytes("v2")), &token)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        assert_eq!(app.get(routes::ABOUT_CV).await.bytes, pdf_bytes("v2"));
        let old = ContentHash::compute(&pdf_bytes("v1"));
        assert!(!app.blob_exists(&old).await);
    }

    #[tokio::test]
    async fn non_pdf_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let form = Form::new().part("file", file_part(png_bytes("x"), "cv.png", "image/png"));

        let res = app
            .multipart_with_token(Method::POST, routes::ADMIN_CV, form, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Only PDF files are allowed");
        assert_eq!(app.get(routes::ABOUT_CV).await.status, 404);
    }

    #[tokio::test]
    async fn pdf_name_with_foreign_bytes_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .multipart_with_token(
                Method::POST,
                routes::ADMIN_CV,
                cv_form(b"plain text, not a pdf".to_vec()),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Only PDF files are allowed");
    }

    #[tokio::test]
    async fn missing_file_field_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let form = Form::new().text("note", "no file here");

        let res = app
            .multipart_with_token(Method::POST, routes::ADMIN_CV, form, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn delete_removes_the_file() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        app.multipart_with_token(Method::POST, routes::ADMIN_CV, cv_form(pdf_bytes("v1")), &token)
            .await;

        let res = app.delete_with_token(routes::ADMIN_CV, &token).await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get(routes::ABOUT_CV).await.status, 404);
        let hash = ContentHash::compute(&pdf_bytes("v1"));
        assert!(!app.blob_exists(&hash).await);

        let res = app.delete_with_token(routes::ADMIN_CV, &token).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn upload_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .multipart_without_token(routes::ADMIN_CV, cv_form(pdf_bytes("v1")))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }
}

mod headshot {
    use super::*;

    #[tokio::test]
    async fn upload_then_download_with_etag() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .multipart_with_token(
                Method::POST,
                routes::ADMIN_HEADSHOT,
                headshot_form(png_bytes("face")),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["kind"], "headshot");
        assert_eq!(res.body["url"], routes::ABOUT_HEADSHOT);

        let file = app.get(routes::ABOUT_HEADSHOT).await;
        assert_eq!(file.status, 200);
        assert_eq!(file.bytes, png_bytes("face"));
        assert_eq!(file.header("content-type"), Some("image/png"));

        let etag = file.header("etag").expect("etag header").to_string();
        let cached = app
            .get_with_headers(routes::ABOUT_HEADSHOT, &[("If-None-Match", etag.as_str())])
            .await;
        assert_eq!(cached.status, 304);
    }

    #[tokio::test]
    async fn pdf_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let form = Form::new().part(
            "file",
            file_part(pdf_bytes("x"), "portrait.pdf", "application/pdf"),
        );

        let res = app
            .multipart_with_token(Method::POST, routes::ADMIN_HEADSHOT, form, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Only PNG files are allowed");
    }

    #[tokio::test]
    async fn absent_headshot_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::ABOUT_HEADSHOT).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn blob_shared_with_an_artwork_survives_delete() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        // insert_artwork stores png_bytes(id), so this artwork shares the blob.
        app.insert_artwork("face", "Self Portrait", 2024, gallery_common::Category::Painting, 0)
            .await;
        app.multipart_with_token(
            Method::POST,
            routes::ADMIN_HEADSHOT,
            headshot_form(png_bytes("face")),
            &token,
        )
        .await;

        let res = app.delete_with_token(routes::ADMIN_HEADSHOT, &token).await;
        assert_eq!(res.status, 204);

        let image = app.get(&routes::artwork_image("face")).await;
        assert_eq!(image.status, 200);
        assert_eq!(image.bytes, png_bytes("face"));
    }
}
