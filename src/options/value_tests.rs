//! Tests for `OptionValue` and `RenderOptions`.

use super::{OptionValue, RenderOptions};

mod option_value {
    use super::*;

    #[test]
    fn scalars_render_for_query() {
        assert_eq!(OptionValue::from("png").query_value().unwrap(), "png");
        assert_eq!(OptionValue::from(true).query_value().unwrap(), "true");
        assert_eq!(OptionValue::from(1280).query_value().unwrap(), "1280");
        assert_eq!(OptionValue::from(0.5).query_value().unwrap(), "0.5");
    }

    #[test]
    fn list_renders_only_last_element() {
        let value = OptionValue::from(vec![
            "x-my-first-header=somevalue",
            "x-my-second-header=someothervalue",
        ]);

        assert_eq!(
            value.query_value().unwrap(),
            "x-my-second-header=someothervalue"
        );
    }

    #[test]
    fn empty_list_renders_nothing() {
        let value = OptionValue::List(vec![]);

        assert!(value.query_value().is_none());
    }

    #[test]
    fn as_text_only_matches_text() {
        assert_eq!(OptionValue::from("a").as_text(), Some("a"));
        assert_eq!(OptionValue::from(1).as_text(), None);
    }

    #[test]
    fn display_shows_lists_bracketed() {
        let value = OptionValue::from(vec!["a", "b"]);

        assert_eq!(value.to_string(), "[a, b]");
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&OptionValue::from(vec!["a", "b"])).unwrap();

        assert_eq!(json, r#"["a","b"]"#);
        assert_eq!(serde_json::to_string(&OptionValue::from(false)).unwrap(), "false");
    }
}

mod render_options {
    use super::*;

    #[test]
    fn str_and_string_keys_are_the_same_key() {
        let mut options = RenderOptions::new().with("url", "https://a.example.com");
        let previous = options.insert(String::from("url"), "https://b.example.com");

        assert_eq!(previous, Some(OptionValue::from("https://a.example.com")));
        assert_eq!(options.len(), 1);
        assert_eq!(
            options.get("url"),
            Some(&OptionValue::from("https://b.example.com"))
        );
    }

    #[test]
    fn keys_are_case_sensitive() {
        let options = RenderOptions::new().with("url", "a.com").with("URL", "b.com");

        assert_eq!(options.len(), 2);
    }

    #[test]
    fn replacing_keeps_original_position() {
        let mut options = RenderOptions::new()
            .with("url", "https://example.com")
            .with("width", 500);
        options.insert("url", "https://example.org");

        let keys: Vec<&str> = options.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["url", "width"]);
    }

    #[test]
    fn query_string_keeps_insertion_order() {
        let options = RenderOptions::new()
            .with("width", 700)
            .with("url", "https://www.example.com")
            .with("full_page", false);

        assert_eq!(
            options.to_query_string(),
            "width=700&url=https%3A%2F%2Fwww.example.com&full_page=false"
        );
    }

    #[test]
    fn query_string_uses_form_encoding() {
        let options = RenderOptions::new()
            .with("html", "<h1>Hello world</h1>")
            .with("selector", "#main*");

        assert_eq!(
            options.to_query_string(),
            "html=%3Ch1%3EHello+world%3C%2Fh1%3E&selector=%23main*"
        );
    }

    #[test]
    fn query_string_skips_empty_lists() {
        let options = RenderOptions::new()
            .with("url", "example.com")
            .with("header", Vec::<String>::new());

        assert_eq!(options.to_query_string(), "url=example.com");
    }

    #[test]
    fn from_iterator_collects_in_order() {
        let options: RenderOptions = [("url", "example.com"), ("format", "pdf")]
            .into_iter()
            .collect();

        assert_eq!(options.to_query_string(), "url=example.com&format=pdf");
    }

    #[test]
    fn serializes_as_ordered_json_object() {
        let options = RenderOptions::new()
            .with("url", "https://www.example.com")
            .with("webhook_url", "https://www.example.com/webhook")
            .with("header", vec!["a=1", "b=2"]);

        let json = serde_json::to_string(&options).unwrap();

        assert_eq!(
            json,
            r#"{"url":"https://www.example.com","webhook_url":"https://www.example.com/webhook","header":["a=1","b=2"]}"#
        );
    }

    #[test]
    fn empty_by_default() {
        let options = RenderOptions::default();

        assert!(options.is_empty());
        assert_eq!(options.to_query_string(), "");
    }
}
