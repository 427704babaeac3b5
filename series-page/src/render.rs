//! HTML page builder: header, main content, navigation and the media
//! detail view.

use async_trait::async_trait;
use serde_json::Value;
use series_contracts::{DetailPageRequest, PageBuilder};
use series_core::ADULT_CONTENT_LINK_ID;

use crate::dom::{DETAIL_SECTION_ID, Element, HIDDEN_CLASS, Node};

fn accent(is_purple_theme: bool) -> &'static str {
    if is_purple_theme {
        "bg-purple-800"
    } else {
        "bg-orange-600"
    }
}

fn image_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[derive(Debug, Clone, Default)]
pub struct HtmlPageBuilder;

impl HtmlPageBuilder {
    pub fn new() -> Self {
        Self
    }

    fn nav_link(href: &str, label: &str) -> Element {
        Element::new("a")
            .attr("href", href)
            .class("nav-link")
            .text(label)
    }

    fn local_episodes(request: &DetailPageRequest<'_>) -> Option<Element> {
        if request.local_episodes_db.is_empty() {
            return None;
        }

        let mut list = Element::new("ul").class("local-episodes");
        for (key, entry) in request.local_episodes_db.iter() {
            let label = entry
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(key.as_str());
            let item = match entry.get("url").and_then(Value::as_str) {
                Some(url) => Element::new("li").child(
                    Element::new("a").attr("href", url).text(label),
                ),
                None => Element::new("li").text(label),
            };
            list.push(item);
        }
        Some(list)
    }
}

#[async_trait]
impl PageBuilder for HtmlPageBuilder {
    type Node = Node;

    fn build_header(&self, user: Option<&str>, is_purple_theme: bool) -> Node {
        let mut header = Element::new("header")
            .class(&format!("site-header {}", accent(is_purple_theme)))
            .child(
                Element::new("a")
                    .attr("href", "/go#home")
                    .class("logo")
                    .text("Series"),
            );
        if let Some(user) = user {
            header.push(Element::new("span").class("user-name").text(user));
        }
        header.into()
    }

    fn build_main_content(&self) -> Node {
        Element::new("main")
            .id("main-content")
            .child(Element::new("section").id(DETAIL_SECTION_ID))
            .into()
    }

    fn build_navigation_bar(
        &self,
        adult_content_enabled: bool,
        is_purple_theme: bool,
    ) -> Node {
        let mut adult = Self::nav_link("/go/adult", "+18").id(ADULT_CONTENT_LINK_ID);
        if !adult_content_enabled {
            adult.add_class(HIDDEN_CLASS);
        }

        Element::new("nav")
            .class(&format!("nav-bar {}", accent(is_purple_theme)))
            .child(Self::nav_link("/go#home", "Inicio"))
            .child(Self::nav_link("/go/movie", "Películas"))
            .child(Self::nav_link("/go/tv", "Series"))
            .child(adult)
            .into()
    }

    async fn build_movie_detail_page(
        &self,
        request: DetailPageRequest<'_>,
    ) -> Node {
        let metadata = request.metadata;
        let mut article = Element::new("article")
            .class("media-detail")
            .attr(
                "data-media-type",
                request.media_type.map(|t| t.as_str()).unwrap_or_default(),
            )
            .attr("data-media-id", request.media_id.unwrap_or_default());

        if let Some(backdrop) = metadata.backdrop_path() {
            article.push(
                Element::new("img")
                    .class("backdrop")
                    .attr("src", image_url(request.backdrop_base, backdrop))
                    .attr("alt", ""),
            );
        }
        if let Some(poster) = metadata.poster_path() {
            article.push(
                Element::new("img")
                    .class("poster")
                    .attr("src", image_url(request.image_base, poster))
                    .attr("alt", metadata.title().unwrap_or_default()),
            );
        }

        article.push(
            Element::new("h1")
                .class("title")
                .text(metadata.title().unwrap_or("Sin título")),
        );

        if let Some(season) = request.season {
            let label = match request.episode {
                Some(episode) => format!("Temporada {season} · Episodio {episode}"),
                None => format!("Temporada {season}"),
            };
            let mut badge = Element::new("p").class("episode-badge").text(label);
            if let Some(kind) = request.episode_type {
                badge.set_attribute("data-episode-type", kind);
            }
            article.push(badge);
        }

        if let Some(date) = metadata.release_date() {
            article.push(Element::new("p").class("release-date").text(date));
        }
        if let Some(overview) = metadata.overview() {
            article.push(Element::new("p").class("overview").text(overview));
        }
        if let Some(episodes) = Self::local_episodes(&request) {
            article.push(episodes);
        }

        let accent = if request.is_purple_theme {
            "text-purple-400"
        } else {
            "text-orange-400"
        };
        article.add_class(accent);
        article.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use series_model::{LocalEpisodesDb, MediaMetadata, MediaType};

    fn element(node: Node) -> Element {
        match node {
            Node::Element(element) => element,
            Node::Text(text) => panic!("expected element, got text {text:?}"),
        }
    }

    #[test]
    fn navigation_bar_hides_adult_link_when_disabled() {
        let builder = HtmlPageBuilder::new();

        let hidden = element(builder.build_navigation_bar(false, false));
        let link = hidden.find_by_id(ADULT_CONTENT_LINK_ID).unwrap();
        assert!(link.has_class(HIDDEN_CLASS));

        let shown = element(builder.build_navigation_bar(true, true));
        let link = shown.find_by_id(ADULT_CONTENT_LINK_ID).unwrap();
        assert!(!link.has_class(HIDDEN_CLASS));
        assert!(shown.has_class("bg-purple-800"));
    }

    #[test]
    fn main_content_contains_detail_section() {
        let main = element(HtmlPageBuilder::new().build_main_content());
        assert!(main.find_by_id(DETAIL_SECTION_ID).is_some());
    }

    #[tokio::test]
    async fn detail_page_shows_metadata_and_episode() {
        let metadata = MediaMetadata::new(json!({
            "name": "Pilot",
            "overview": "It begins.",
            "still_path": "/still.jpg",
            "air_date": "2017-12-01"
        }));
        let mut db = LocalEpisodesDb::new();
        db.insert("s1e1", json!({"title": "Pilot (local)", "url": "/media/s1e1.mp4"}));
        let media_type = MediaType::Tv;

        let node = HtmlPageBuilder::new()
            .build_movie_detail_page(DetailPageRequest {
                api_base: "https://catalog.test/3",
                backdrop_base: "https://img.test/w780",
                image_base: "https://img.test/w500/",
                metadata: &metadata,
                media_type: Some(&media_type),
                media_id: Some("70523"),
                season: Some(1),
                episode: Some(1),
                episode_type: Some("standard"),
                local_episodes_db: &db,
                is_purple_theme: false,
            })
            .await;

        let html = element(node).to_html();
        assert!(html.contains("<h1 class=\"title\">Pilot</h1>"));
        assert!(html.contains("src=\"https://img.test/w500/still.jpg\""));
        assert!(html.contains("Temporada 1 · Episodio 1"));
        assert!(html.contains("<a href=\"/media/s1e1.mp4\">Pilot (local)</a>"));
        assert!(!html.contains("backdrop"));
    }
}
