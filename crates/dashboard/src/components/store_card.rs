//! Store card shown in the dashboard grid.
//!
//! The card is clickable as a whole and also contains links and a button.
//! A click carries the path of elements from the target up to the card; as
//! soon as that path crosses a link or button, the innermost one of those
//! decides and the whole-card navigation is suppressed.

use storemaker_core::display::{
    description_or_placeholder, domain_display, format_created_date, status_badge_class,
};
use storemaker_core::{Store, StoreId, StoreStatus};

use crate::services::Route;

/// htmx trigger for the whole-card click: ignore clicks inside links and
/// buttons.
pub const CARD_CLICK_TRIGGER: &str = "click[!event.target.closest('a, button')]";

/// Elements a click can land on inside a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardElement {
    /// The card container itself.
    Card,
    /// Non-interactive content: text, logo, badge.
    Content,
    /// "View live store" link.
    ViewLive,
    /// "Edit store" link.
    Edit,
    /// "Delete store" button.
    Delete,
    /// "Manage" link in the footer.
    Manage,
}

impl CardElement {
    /// Links and buttons.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::ViewLive | Self::Edit | Self::Delete | Self::Manage)
    }
}

/// Path of a click, innermost element first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickTarget {
    path: Vec<CardElement>,
}

impl ClickTarget {
    #[must_use]
    pub fn new(path: impl IntoIterator<Item = CardElement>) -> Self {
        Self {
            path: path.into_iter().collect(),
        }
    }

    /// A click on the card background.
    #[must_use]
    pub fn background() -> Self {
        Self::new([CardElement::Card])
    }

    /// The innermost link or button on the path, if any.
    #[must_use]
    pub fn interactive(&self) -> Option<CardElement> {
        self.path.iter().copied().find(|e| e.is_interactive())
    }
}

/// What a click on the card asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardCommand {
    Navigate(Route),
    RequestDelete(StoreId),
    Nothing,
}

/// A store rendered as a card. Pure; performs no I/O.
#[derive(Debug, Clone, Copy)]
pub struct StoreCard<'a> {
    store: &'a Store,
}

impl<'a> StoreCard<'a> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Edit, delete and manage need the backend id.
    #[must_use]
    pub const fn actions_enabled(&self) -> bool {
        self.store.is_persisted()
    }

    #[must_use]
    pub fn detail_route(&self) -> Option<Route> {
        self.store.id.map(Route::StoreDetail)
    }

    /// Public storefront, only for active stores with a slug.
    #[must_use]
    pub fn live_route(&self) -> Option<Route> {
        if !self.store.has_status(StoreStatus::Active) {
            return None;
        }
        self.store
            .slug()
            .map(|slug| Route::Storefront(slug.to_owned()))
    }

    /// Resolve a click.
    #[must_use]
    pub fn handle_click(&self, target: &ClickTarget) -> CardCommand {
        let command = match target.interactive() {
            Some(CardElement::ViewLive) => self.live_route().map(CardCommand::Navigate),
            Some(CardElement::Edit | CardElement::Manage) | None => {
                self.detail_route().map(CardCommand::Navigate)
            }
            Some(CardElement::Delete) => self.store.id.map(CardCommand::RequestDelete),
            Some(CardElement::Card | CardElement::Content) => None,
        };
        command.unwrap_or(CardCommand::Nothing)
    }

    /// Template data for the card.
    #[must_use]
    pub fn view(&self, storefront_url: &str) -> StoreCardView {
        let status = self.store.visual_status();
        StoreCardView {
            id: self.store.id.map(|id| id.to_string()),
            name: self.store.name.clone(),
            logo: self.store.logo().map(str::to_owned),
            domain: domain_display(self.store),
            badge_label: status.as_str(),
            badge_class: status_badge_class(status),
            description: description_or_placeholder(self.store).to_owned(),
            created: format_created_date(self.store.created_at()),
            live_href: self.live_route().map(|r| r.href(storefront_url)),
            detail_href: self.detail_route().map(|r| r.path()),
            click_trigger: CARD_CLICK_TRIGGER,
        }
    }
}

/// Flattened card data for the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCardView {
    pub id: Option<String>,
    pub name: String,
    pub logo: Option<String>,
    pub domain: String,
    pub badge_label: &'static str,
    pub badge_class: &'static str,
    pub description: String,
    pub created: String,
    pub live_href: Option<String>,
    /// Target of the card, edit and manage links; `None` disables them.
    pub detail_href: Option<String>,
    pub click_trigger: &'static str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn active_store() -> Store {
        Store {
            id: Some(StoreId::new(3)),
            name: "Candles".to_string(),
            slug: Some("candles".to_string()),
            status: Some(StoreStatus::Active),
            created_at: Some("2024-01-15T08:30:00Z".to_string()),
            ..Store::default()
        }
    }

    fn unsaved_store() -> Store {
        Store {
            name: "Pending".to_string(),
            ..Store::default()
        }
    }

    #[test]
    fn test_background_click_opens_detail() {
        let store = active_store();
        let card = StoreCard::new(&store);
        assert_eq!(
            card.handle_click(&ClickTarget::background()),
            CardCommand::Navigate(Route::StoreDetail(StoreId::new(3)))
        );
        assert_eq!(
            card.handle_click(&ClickTarget::new([CardElement::Content, CardElement::Card])),
            CardCommand::Navigate(Route::StoreDetail(StoreId::new(3)))
        );
    }

    #[test]
    fn test_background_click_without_id_does_nothing() {
        let store = unsaved_store();
        let card = StoreCard::new(&store);
        assert_eq!(
            card.handle_click(&ClickTarget::background()),
            CardCommand::Nothing
        );
    }

    #[test]
    fn test_interactive_elements_never_trigger_card_navigation() {
        let store = active_store();
        let card = StoreCard::new(&store);

        // icon inside the delete button
        let click = ClickTarget::new([CardElement::Content, CardElement::Delete, CardElement::Card]);
        assert_eq!(
            card.handle_click(&click),
            CardCommand::RequestDelete(StoreId::new(3))
        );

        let click = ClickTarget::new([CardElement::ViewLive, CardElement::Card]);
        assert_eq!(
            card.handle_click(&click),
            CardCommand::Navigate(Route::Storefront("candles".to_string()))
        );
    }

    #[test]
    fn test_disabled_controls_do_nothing() {
        let store = unsaved_store();
        let card = StoreCard::new(&store);
        for element in [CardElement::Edit, CardElement::Delete, CardElement::Manage, CardElement::ViewLive] {
            assert_eq!(
                card.handle_click(&ClickTarget::new([element, CardElement::Card])),
                CardCommand::Nothing,
                "{element:?}"
            );
        }
    }

    #[test]
    fn test_actions_enabled_exactly_when_id_present() {
        let with_id = active_store();
        let without_id = unsaved_store();
        assert!(StoreCard::new(&with_id).actions_enabled());
        assert!(!StoreCard::new(&without_id).actions_enabled());
        assert!(StoreCard::new(&with_id).view("").detail_href.is_some());
        assert!(StoreCard::new(&without_id).view("").detail_href.is_none());
    }

    #[test]
    fn test_live_link_requires_active_and_slug() {
        let mut store = active_store();
        assert_eq!(
            StoreCard::new(&store).view("https://shops.test").live_href.as_deref(),
            Some("https://shops.test/stores/candles")
        );

        store.status = Some(StoreStatus::Draft);
        assert!(StoreCard::new(&store).live_route().is_none());

        store.status = Some(StoreStatus::Active);
        store.slug = Some(String::new());
        assert!(StoreCard::new(&store).live_route().is_none());
    }

    #[test]
    fn test_view_fields() {
        let store = active_store();
        let view = StoreCard::new(&store).view("");
        assert_eq!(view.domain, "candles.storemaker.com");
        assert_eq!(view.badge_label, "active");
        assert!(view.badge_class.contains("green"));
        assert_eq!(view.description, "No description provided");
        assert_eq!(view.created, "1/15/2024");
        assert_eq!(view.detail_href.as_deref(), Some("/dashboard/stores/3"));
        assert_eq!(view.click_trigger, CARD_CLICK_TRIGGER);
    }

    #[test]
    fn test_unknown_status_looks_like_draft() {
        let mut store = unsaved_store();
        store.status = Some(StoreStatus::Unrecognized);
        let view = StoreCard::new(&store).view("");
        assert_eq!(view.badge_label, "draft");
        assert_eq!(view.badge_class, status_badge_class(StoreStatus::Draft));
        assert_eq!(view.created, "Unknown date");
    }
}
