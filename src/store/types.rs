//! Records held by the site store.
//!
//! Field names serialize in camelCase so persisted values keep the layout
//! the site has always written (`siteName`, `heroTitle`, `blogPosts`, ...).

use serde::{Deserialize, Serialize};

/// Site-wide settings. Exactly one value exists per store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: String,
    /// Theme color token (e.g. "indigo-600")
    pub primary_color: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_image: String,
    pub about_content: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub contact_address: String,
}

/// Partial settings update. Every `Some` field overwrites the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_address: Option<String>,
}

impl SettingsPatch {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl SiteSettings {
    /// Shallow merge: present fields replace, absent fields stay.
    pub fn merge(&mut self, patch: SettingsPatch) {
        let SettingsPatch {
            site_name,
            primary_color,
            hero_title,
            hero_subtitle,
            hero_image,
            about_content,
            contact_email,
            contact_phone,
            contact_address,
        } = patch;

        overwrite(&mut self.site_name, site_name);
        overwrite(&mut self.primary_color, primary_color);
        overwrite(&mut self.hero_title, hero_title);
        overwrite(&mut self.hero_subtitle, hero_subtitle);
        overwrite(&mut self.hero_image, hero_image);
        overwrite(&mut self.about_content, about_content);
        overwrite(&mut self.contact_email, contact_email);
        overwrite(&mut self.contact_phone, contact_phone);
        overwrite(&mut self.contact_address, contact_address);
    }
}

#[inline]
fn overwrite(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

/// A bookable destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub region: String,
    pub description: String,
    /// Price in currency units
    pub price: f64,
    /// Image URI
    pub image: String,
    pub featured: bool,
}

/// A blog article. `published` gates public visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    /// Publication date as ISO 8601 string (e.g., "2024-05-20")
    pub date: String,
    pub image: String,
    pub category: String,
    pub published: bool,
}

/// Static reference data; the icon is a symbolic name resolved by the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}

/// Anything kept in an id-keyed collection.
pub trait Keyed {
    fn id(&self) -> &str;
}

impl Keyed for Destination {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Keyed for BlogPost {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Read-only aggregate handed to consumers.
///
/// A snapshot is a copy: mutating it never reaches the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteState {
    pub settings: SiteSettings,
    pub destinations: Vec<Destination>,
    pub blog_posts: Vec<BlogPost>,
    pub services: Vec<Service>,
    pub is_admin: bool,
}

/// Contact block shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterContact<'a> {
    pub address: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
}

impl SiteState {
    /// Destinations flagged for the home page, in display order.
    pub fn featured_destinations(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.iter().filter(|d| d.featured)
    }

    /// Posts visible to the public.
    pub fn published_posts(&self) -> impl Iterator<Item = &BlogPost> {
        self.blog_posts.iter().filter(|p| p.published)
    }

    pub fn footer_contact(&self) -> FooterContact<'_> {
        FooterContact {
            address: &self.settings.contact_address,
            phone: &self.settings.contact_phone,
            email: &self.settings.contact_email,
        }
    }

    pub fn copyright_line(&self, year: i32) -> String {
        format!("© {year} {}. All rights reserved.", self.settings.site_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::defaults;

    #[test]
    fn test_merge_overwrites_only_present_fields() {
        let mut settings = defaults::settings();
        let before = settings.clone();

        settings.merge(SettingsPatch {
            site_name: Some("Wander".into()),
            contact_phone: Some("+44 20 0000 0000".into()),
            ..Default::default()
        });

        assert_eq!(settings.site_name, "Wander");
        assert_eq!(settings.contact_phone, "+44 20 0000 0000");
        assert_eq!(settings.hero_title, before.hero_title);
        assert_eq!(settings.primary_color, before.primary_color);
        assert_eq!(settings.contact_email, before.contact_email);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut settings = defaults::settings();
        let patch = SettingsPatch::default();
        assert!(patch.is_empty());
        settings.merge(patch);
        assert_eq!(settings, defaults::settings());
    }

    #[test]
    fn test_settings_serialize_camel_case() {
        let json = serde_json::to_value(defaults::settings()).unwrap();
        assert_eq!(json["siteName"], "TourWithMe");
        assert_eq!(json["primaryColor"], "indigo-600");
        assert!(json.get("site_name").is_none());
    }

    #[test]
    fn test_patch_rejects_unknown_fields() {
        let result: Result<SettingsPatch, _> =
            serde_json::from_str(r#"{"siteName":"X","tagline":"nope"}"#);
        assert!(result.is_err());

        let patch: SettingsPatch = serde_json::from_str(r#"{"heroTitle":"Go"}"#).unwrap();
        assert_eq!(patch.hero_title.as_deref(), Some("Go"));
        assert!(patch.site_name.is_none());
    }

    #[test]
    fn test_state_view_helpers() {
        let mut state = SiteState {
            settings: defaults::settings(),
            destinations: defaults::destinations(),
            blog_posts: defaults::blog_posts(),
            services: defaults::services(),
            is_admin: false,
        };
        state.blog_posts[1].published = false;

        let featured: Vec<_> = state.featured_destinations().map(|d| d.id.as_str()).collect();
        assert_eq!(featured, ["1", "2", "3"]);

        let published: Vec<_> = state.published_posts().map(|p| p.id.as_str()).collect();
        assert_eq!(published, ["1"]);

        let contact = state.footer_contact();
        assert_eq!(contact.email, "hello@tourwithme.com");
        assert_eq!(
            state.copyright_line(2024),
            "© 2024 TourWithMe. All rights reserved."
        );
    }
}
