use gallery_common::Category;
use gallery_common::storage::ContentHash;
use reqwest::Method;

use crate::common::{TestApp, artwork_form, file_part, pdf_bytes, png_bytes, routes};

fn painting_fields<'a>(title: &'a str, year: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![("title", title), ("year", year), ("category", "Painting")]
}

mod access {
    use super::*;

    #[tokio::test]
    async fn table_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::ADMIN_ARTWORKS).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn create_requires_a_token() {
        let app = TestApp::spawn().await;
        let form = artwork_form(&painting_fields("Harbor", "2024"), Some(png_bytes("a")));

        let res = app
            .multipart_without_token(routes::ADMIN_ARTWORKS, form)
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn delete_with_bad_token_is_rejected() {
        let app = TestApp::spawn().await;
        app.insert_artwork("a", "Harbor", 2024, Category::Painting, 0)
            .await;

        let res = app
            .delete_with_token(&routes::admin_artwork("a"), "forged")
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
        assert_eq!(app.get(&routes::artwork("a")).await.status, 200);
    }
}

mod create {
    use super::*;

    #[tokio::test]
    async fn stores_fields_and_image() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let form = artwork_form(
            &[
                ("title", "  Harbor at Dusk "),
                ("year", "2024"),
                ("category", "Work on Paper"),
                ("details", "Charcoal on paper"),
                ("height", "11.5"),
                ("width", "8.25"),
            ],
            Some(png_bytes("harbor")),
        );

        let res = app
            .multipart_with_token(Method::POST, routes::ADMIN_ARTWORKS, form, &token)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let id = res.id();
        assert_eq!(res.body["title"], "Harbor at Dusk");
        assert_eq!(res.body["year"], 2024);
        assert_eq!(res.body["category"], "Work on Paper");
        assert_eq!(res.body["details"], "Charcoal on paper");
        assert_eq!(res.body["dimensions"], "11.5\" × 8.25\"");
        assert_eq!(res.body["image_url"], routes::artwork_image(&id));

        let image = app.get(&routes::artwork_image(&id)).await;
        assert_eq!(image.status, 200);
        assert_eq!(image.bytes, png_bytes("harbor"));
    }

    #[tokio::test]
    async fn medium_is_accepted_for_category() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let form = artwork_form(
            &[("title", "Column"), ("year", "2023"), ("medium", "Sculpture")],
            Some(png_bytes("column")),
        );

        let res = app
            .multipart_with_token(Method::POST, routes::ADMIN_ARTWORKS, form, &token)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["category"], "Sculpture");
    }

    #[tokio::test]
    async fn image_is_required() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let form = artwork_form(&painting_fields("Harbor", "2024"), None);

        let res = app
            .multipart_with_token(Method::POST, routes::ADMIN_ARTWORKS, form, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Image is required");
    }

    #[tokio::test]
    async fn non_png_image_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let form = artwork_form(&painting_fields("Harbor", "2024"), None).part(
            "image",
            file_part(pdf_bytes("x"), "work.pdf", "application/pdf"),
        );

        let res = app
            .multipart_with_token(Method::POST, routes::ADMIN_ARTWORKS, form, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Only PNG images are allowed");
    }

    #[tokio::test]
    async fn png_name_with_foreign_bytes_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let form = artwork_form(&painting_fields("Harbor", "2024"), None).part(
            "image",
            file_part(b"GIF89a-not-a-png".to_vec(), "work.png", "image/png"),
        );

        let res = app
            .multipart_with_token(Method::POST, routes::ADMIN_ARTWORKS, form, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Only PNG images are allowed");
        assert_eq!(app.get(routes::ARTWORKS).await.body["count"], 0);
    }

    #[tokio::test]
    async fn year_bounds_are_enforced() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        for (year, message) in [
            ("1999", "Year must be 2000 or later"),
            ("twenty", "Year must be a whole number"),
            ("", "Year is required"),
        ] {
            let form = artwork_form(&painting_fields("Harbor", year), Some(png_bytes("a")));
            let res = app
                .multipart_with_token(Method::POST, routes::ADMIN_ARTWORKS, form, &token)
                .await;
            assert_eq!(res.status, 400, "year {year:?}");
            assert_eq!(res.body["message"], message, "year {year:?}");
        }

        let form = artwork_form(&painting_fields("Harbor", "9999"), Some(png_bytes("a")));
        let res = app
            .multipart_with_token(Method::POST, routes::ADMIN_ARTWORKS, form, &token)
            .await;
        assert_eq!(res.status, 400);
        assert!(
            res.body["message"]
                .as_str()
                .is_some_and(|m| m.starts_with("Year cannot be later than")),
            "{}",
            res.text
        );
    }

    #[tokio::test]
    async fn blank_title_and_unknown_category_are_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let form = artwork_form(&painting_fields("   ", "2024"), Some(png_bytes("a")));
        let res = app
            .multipart_with_token(Method::POST, routes::ADMIN_ARTWORKS, form, &token)
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Title is required");

        let form = artwork_form(
            &[("title", "Pot"), ("year", "2024"), ("category", "Ceramics")],
            Some(png_bytes("a")),
        );
        let res = app
            .multipart_with_token(Method::POST, routes::ADMIN_ARTWORKS, form, &token)
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn partial_sculpture_dimensions_are_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let form = artwork_form(
            &[
                ("title", "Stack"),
                ("year", "2022"),
                ("category", "Sculpture"),
                ("height", "12"),
                ("width", "8"),
            ],
            Some(png_bytes("stack")),
        );

        let res = app
            .multipart_with_token(Method::POST, routes::ADMIN_ARTWORKS, form, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(
            res.body["message"],
            "Length is required when dimensions are provided"
        );
    }

    #[tokio::test]
    async fn non_numeric_dimension_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let mut fields = painting_fields("Field", "2024");
        fields.push(("height", "tall"));
        fields.push(("width", "18"));

        let res = app
            .multipart_with_token(
                Method::POST,
                routes::ADMIN_ARTWORKS,
                artwork_form(&fields, Some(png_bytes("field"))),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Height must be a number");
    }
}

mod edit {
    use super::*;

    #[tokio::test]
    async fn get_returns_the_artwork() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app
            .create_artwork(&token, "Harbor", 2024, Category::Painting)
            .await;

        let res = app
            .get_with_token(&routes::admin_artwork(&id), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], id.as_str());
        assert_eq!(res.body["title"], "Harbor");
    }

    #[tokio::test]
    async fn put_replaces_fields_and_keeps_image_when_omitted() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app
            .create_artwork(&token, "Harbor", 2024, Category::Painting)
            .await;

        let form = artwork_form(
            &[("title", "Harbor II"), ("year", "2023"), ("category", "Painting")],
            None,
        );
        let res = app
            .multipart_with_token(Method::PUT, &routes::admin_artwork(&id), form, &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["title"], "Harbor II");
        assert_eq!(res.body["year"], 2023);

        let image = app.get(&routes::artwork_image(&id)).await;
        assert_eq!(image.bytes, png_bytes("Harbor"));
    }

    #[tokio::test]
    async fn empty_file_input_keeps_the_image() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app
            .create_artwork(&token, "Harbor", 2024, Category::Painting)
            .await;

        let form = artwork_form(&painting_fields("Harbor", "2024"), None).part(
            "image",
            file_part(Vec::new(), "", "application/octet-stream"),
        );
        let res = app
            .multipart_with_token(Method::PUT, &routes::admin_artwork(&id), form, &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let image = app.get(&routes::artwork_image(&id)).await;
        assert_eq!(image.bytes, png_bytes("Harbor"));
    }

    #[tokio::test]
    async fn replacing_the_image_releases_the_old_blob() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app
            .create_artwork(&token, "Harbor", 2024, Category::Painting)
            .await;
        let old_hash = ContentHash::compute(&png_bytes("Harbor"));
        assert!(app.blob_exists(&old_hash).await);

        let form = artwork_form(&painting_fields("Harbor", "2024"), Some(png_bytes("new")));
        let res = app
            .multipart_with_token(Method::PUT, &routes::admin_artwork(&id), form, &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(app.get(&routes::artwork_image(&id)).await.bytes, png_bytes("new"));
        assert!(!app.blob_exists(&old_hash).await);
    }

    #[tokio::test]
    async fn shared_blob_survives_until_last_reference_goes() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        // Same title means same image bytes, so both rows share one blob.
        let first = app
            .create_artwork(&token, "Twin", 2024, Category::Painting)
            .await;
        let second = app
            .create_artwork(&token, "Twin", 2023, Category::Painting)
            .await;
        let hash = ContentHash::compute(&png_bytes("Twin"));

        let res = app
            .delete_with_token(&routes::admin_artwork(&first), &token)
            .await;
        assert_eq!(res.status, 204);
        assert!(app.blob_exists(&hash).await);

        let res = app
            .delete_with_token(&routes::admin_artwork(&second), &token)
            .await;
        assert_eq!(res.status, 204);
        assert!(!app.blob_exists(&hash).await);
    }

    #[tokio::test]
    async fn invalid_put_leaves_the_artwork_untouched() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app
            .create_artwork(&token, "Harbor", 2024, Category::Painting)
            .await;

        let form = artwork_form(&painting_fields("", "2024"), None);
        let res = app
            .multipart_with_token(Method::PUT, &routes::admin_artwork(&id), form, &token)
            .await;

        assert_eq!(res.status, 400);
        let res = app.get(&routes::artwork(&id)).await;
        assert_eq!(res.body["artwork"]["title"], "Harbor");
    }

    #[tokio::test]
    async fn delete_removes_the_artwork() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app
            .create_artwork(&token, "Harbor", 2024, Category::Painting)
            .await;

        let res = app
            .delete_with_token(&routes::admin_artwork(&id), &token)
            .await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get(&routes::artwork(&id)).await.status, 404);
        let res = app
            .delete_with_token(&routes::admin_artwork(&id), &token)
            .await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .get_with_token(&routes::admin_artwork("missing"), &token)
            .await;
        assert_eq!(res.status, 404);

        let form = artwork_form(&painting_fields("Harbor", "2024"), None);
        let res = app
            .multipart_with_token(
                Method::PUT,
                &routes::admin_artwork("missing"),
                form,
                &token,
            )
            .await;
        assert_eq!(res.status, 404);
    }
}

mod table {
    use super::*;

    /// 25 paintings, `n-01` .. `n-25`, years 2000..2024, each updated a minute
    /// after the previous one.
    async fn seed_numbered(app: &TestApp) {
        for n in 1..=25 {
            app.insert_artwork(
                &format!("n-{n:02}"),
                &format!("Work {n:02}"),
                1999 + n,
                Category::Painting,
                i64::from(n),
            )
            .await;
        }
    }

    #[tokio::test]
    async fn paginates_twenty_five_rows_into_three_pages() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        seed_numbered(&app).await;

        let res = app
            .get_with_token(
                &format!("{}?sort_by=year&sort_order=asc&page=3", routes::ADMIN_ARTWORKS),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["pagination"]["total"], 25);
        assert_eq!(res.body["pagination"]["total_pages"], 3);
        assert_eq!(res.body["pagination"]["per_page"], 10);
        assert_eq!(res.body["pagination"]["page"], 3);
        assert_eq!(
            res.artwork_ids("data"),
            vec!["n-21", "n-22", "n-23", "n-24", "n-25"]
        );
        assert_eq!(res.body["showing"]["from"], 21);
        assert_eq!(res.body["showing"]["to"], 25);
    }

    #[tokio::test]
    async fn defaults_to_year_descending() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        seed_numbered(&app).await;

        let res = app.get_with_token(routes::ADMIN_ARTWORKS, &token).await;

        assert_eq!(res.body["sort_by"], "year");
        assert_eq!(res.body["sort_order"], "desc");
        let ids = res.artwork_ids("data");
        assert_eq!(ids.len(), 10);
        assert_eq!(ids[0], "n-25");
        assert_eq!(ids[9], "n-16");
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        seed_numbered(&app).await;

        let res = app
            .get_with_token(&format!("{}?page=9", routes::ADMIN_ARTWORKS), &token)
            .await;

        assert_eq!(res.status, 200);
        assert!(res.artwork_ids("data").is_empty());
        assert!(res.body["showing"].is_null());
        assert_eq!(res.body["pagination"]["total_pages"], 3);
    }

    #[tokio::test]
    async fn per_page_is_clamped() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        seed_numbered(&app).await;

        let res = app
            .get_with_token(&format!("{}?per_page=1000", routes::ADMIN_ARTWORKS), &token)
            .await;

        assert_eq!(res.body["pagination"]["per_page"], 100);
        assert_eq!(res.artwork_ids("data").len(), 25);
    }

    #[tokio::test]
    async fn search_category_and_year_filters_combine() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        app.insert_artwork("a", "Harbor Study", 2024, Category::Painting, 0)
            .await;
        app.insert_artwork("b", "harbor wall", 2023, Category::Painting, 0)
            .await;
        app.insert_artwork("c", "Harbor Cast", 2024, Category::Sculpture, 0)
            .await;
        app.insert_artwork("d", "Field", 2024, Category::Painting, 0)
            .await;

        let res = app
            .get_with_token(&format!("{}?search=HARBOR", routes::ADMIN_ARTWORKS), &token)
            .await;
        let mut ids = res.artwork_ids("data");
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let res = app
            .get_with_token(
                &format!(
                    "{}?search=harbor&category=Painting&year=2024",
                    routes::ADMIN_ARTWORKS
                ),
                &token,
            )
            .await;
        assert_eq!(res.artwork_ids("data"), vec!["a"]);
        assert_eq!(res.body["pagination"]["total"], 1);
        assert_eq!(res.body["available_years"], serde_json::json!([2024, 2023]));
    }

    #[tokio::test]
    async fn blank_filters_mean_no_filter() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        seed_numbered(&app).await;

        for query in ["year=", "category=&year=", "search=&category=&year=&sort_by="] {
            let res = app
                .get_with_token(&format!("{}?{query}", routes::ADMIN_ARTWORKS), &token)
                .await;
            assert_eq!(res.status, 200, "{query}: {}", res.text);
            assert_eq!(res.body["pagination"]["total"], 25, "{query}");
        }
    }

    #[tokio::test]
    async fn ties_break_on_most_recent_update() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        app.insert_artwork("old", "Same", 2024, Category::Painting, 0)
            .await;
        app.insert_artwork("new", "Same", 2024, Category::Painting, 10)
            .await;

        for order in ["asc", "desc"] {
            let res = app
                .get_with_token(
                    &format!("{}?sort_by=title&sort_order={order}", routes::ADMIN_ARTWORKS),
                    &token,
                )
                .await;
            assert_eq!(res.artwork_ids("data"), vec!["new", "old"], "{order}");
        }
    }

    #[tokio::test]
    async fn title_sort_ignores_case() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        app.insert_artwork("b", "beach", 2024, Category::Painting, 0)
            .await;
        app.insert_artwork("a", "Anchor", 2024, Category::Painting, 0)
            .await;
        app.insert_artwork("c", "Cliff", 2024, Category::Painting, 0)
            .await;

        let res = app
            .get_with_token(
                &format!("{}?sort_by=title&sort_order=asc", routes::ADMIN_ARTWORKS),
                &token,
            )
            .await;

        assert_eq!(res.artwork_ids("data"), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn bad_query_values_are_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        for query in [
            "sort_by=price",
            "sort_order=sideways",
            "category=Ceramics",
            "page=first",
            "year=twenty",
        ] {
            let res = app
                .get_with_token(&format!("{}?{query}", routes::ADMIN_ARTWORKS), &token)
                .await;
            assert_eq!(res.status, 400, "{query}");
            assert_eq!(res.body["code"], "VALIDATION_ERROR", "{query}");
        }
    }
}
