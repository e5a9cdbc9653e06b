use crate::domain::FilterError;
use crate::domain::entities::{
    DEFAULT_SORT, FilterEdit, FilterField, HeaderConfig, NsfwPolicy, TrendingAlgorithm, UserRight,
};
use crate::domain::gateways::{AuthGateway, FilterState, ServerConfigGateway};
use crate::domain::services::{EventBus, Subscription};
use crate::presentation::components::FilterForm;
use crate::presentation::services::ModalService;
use std::sync::Arc;

const REMOVE_FILTER_TITLE: &str = "Remove this filter";

const STATIC_SORTS: [(&str, &str); 3] = [
    ("-publishedAt", "Recently added"),
    ("-originallyPublishedAt", "Original publication date"),
    ("name", "Name"),
];

/// Host-supplied settings, read-only to the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInputs {
    pub display_moderation_block: bool,
    pub default_sort: String,
    pub nsfw_policy: NsfwPolicy,
}

impl Default for HeaderInputs {
    fn default() -> Self {
        Self {
            display_moderation_block: false,
            default_sort: DEFAULT_SORT.to_string(),
            nsfw_policy: NsfwPolicy::Display,
        }
    }
}

impl From<&HeaderConfig> for HeaderInputs {
    fn from(config: &HeaderConfig) -> Self {
        Self {
            display_moderation_block: config.display_moderation_block,
            default_sort: config.default_sort.clone(),
            nsfw_policy: config.nsfw_policy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOption {
    pub key: &'static str,
    pub label: &'static str,
    pub is_default: bool,
}

/// A click on a toolbar link, as seen by the host's event loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickEvent {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Filters toolbar state: keeps [`FilterForm`] and the shared [`FilterState`]
/// in step and tells the video list when to re-query.
///
/// Updates flowing from the filter state into the form are always silent.
/// Only a form edit or [`reset_filter`](Self::reset_filter) loads into the
/// filter state, and each of those emits `filters_changed` exactly once.
pub struct VideoFiltersHeader {
    filters: Arc<dyn FilterState>,
    inputs: HeaderInputs,
    auth: Arc<dyn AuthGateway>,
    server: Arc<dyn ServerConfigGateway>,
    modals: ModalService,

    form: Arc<FilterForm>,
    filters_changed: EventBus<()>,
    are_filters_collapsed: bool,
    subscriptions: Vec<Subscription>,
}

impl VideoFiltersHeader {
    pub fn new(
        filters: Arc<dyn FilterState>,
        inputs: HeaderInputs,
        auth: Arc<dyn AuthGateway>,
        server: Arc<dyn ServerConfigGateway>,
        modals: ModalService,
    ) -> Self {
        Self {
            filters,
            inputs,
            auth,
            server,
            modals,
            form: Arc::new(FilterForm::new()),
            filters_changed: EventBus::new(),
            are_filters_collapsed: true,
            subscriptions: Vec::new(),
        }
    }

    /// Builds the form from the current filter state and wires both
    /// directions. Calling it again starts over from a fresh form.
    pub fn init(&mut self) -> Result<(), FilterError> {
        self.destroy();

        self.form = Arc::new(FilterForm::new());
        Self::patch_form(self.filters.as_ref(), &self.form, false)?;

        let sync_filters = Arc::downgrade(&self.filters);
        let sync_form = Arc::downgrade(&self.form);
        let on_change = self.filters.on_change(Box::new(move || {
            match (sync_filters.upgrade(), sync_form.upgrade()) {
                (Some(filters), Some(form)) => Self::patch_form(filters.as_ref(), &form, false),
                _ => Ok(()),
            }
        }));
        self.subscriptions.push(on_change);

        let filters = Arc::clone(&self.filters);
        let filters_changed = self.filters_changed.clone();
        let value_changes = self.form.value_changes().subscribe(move |values| {
            tracing::debug!(?values, "Loading values from form");

            filters.load(values.clone().into())?;
            filters_changed.emit(&());
            Ok(())
        });
        self.subscriptions.push(value_changes);

        tracing::info!("Video filters header initialized");
        Ok(())
    }

    /// Releases the filter state and form subscriptions. Safe to repeat.
    pub fn destroy(&mut self) {
        for mut subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }

    fn patch_form(
        filters: &dyn FilterState,
        form: &FilterForm,
        emit_event: bool,
    ) -> Result<(), FilterError> {
        let values = filters.to_form_object()?;
        tracing::debug!(?values, "Patched form");

        form.patch_value(values, emit_event)
    }

    /// Applies one control edit coming from the user.
    pub fn update_field(&self, edit: FilterEdit) -> Result<(), FilterError> {
        tracing::trace!(field = %edit.field(), "Form field edited");
        self.form.set_field(edit)
    }

    /// Resets one filter chip. Returns whether anything was reset.
    pub fn reset_filter(&self, field: FilterField, can_remove: bool) -> Result<bool, FilterError> {
        if !can_remove {
            return Ok(false);
        }

        self.filters.reset(field)?;
        Self::patch_form(self.filters.as_ref(), &self.form, false)?;
        self.filters_changed.emit(&());

        Ok(true)
    }

    pub fn can_see_all_videos(&self) -> bool {
        if !self.auth.is_logged_in() {
            return false;
        }
        if !self.inputs.display_moderation_block {
            return false;
        }

        self.auth
            .user()
            .is_some_and(|user| user.has_right(UserRight::SeeAllVideos))
    }

    pub fn is_trending_sort_enabled(&self, algorithm: TrendingAlgorithm) -> bool {
        let enabled = self.server.server_config().is_algorithm_enabled(algorithm);

        // Best is computed from the viewer's own history
        if algorithm == TrendingAlgorithm::Best {
            return enabled && self.auth.is_logged_in();
        }

        enabled
    }

    pub fn visible_sort_options(&self) -> Vec<SortOption> {
        let static_sorts = STATIC_SORTS.iter().map(|(key, label)| (*key, *label));
        let trending_sorts = TrendingAlgorithm::ALL
            .into_iter()
            .filter(|algorithm| self.is_trending_sort_enabled(*algorithm))
            .map(|algorithm| (algorithm.sort_key(), algorithm.label()));

        static_sorts
            .chain(trending_sorts)
            .map(|(key, label)| SortOption {
                key,
                label,
                is_default: key == self.inputs.default_sort,
            })
            .collect()
    }

    pub fn can_filter_nsfw(&self) -> bool {
        self.inputs.nsfw_policy != NsfwPolicy::DoNotList
    }

    pub fn filter_title(&self, can_remove: bool) -> &'static str {
        if can_remove { REMOVE_FILTER_TITLE } else { "" }
    }

    /// Anonymous viewers get the quick settings modal instead of the account page.
    pub fn on_account_settings_click(&self, event: &mut ClickEvent) {
        if self.auth.is_logged_in() {
            return;
        }

        event.prevent_default();
        event.stop_propagation();

        self.modals.open_quick_settings();
    }

    pub fn are_filters_collapsed(&self) -> bool {
        self.are_filters_collapsed
    }

    pub fn toggle_filters_collapsed(&mut self) {
        self.are_filters_collapsed = !self.are_filters_collapsed;
    }

    pub fn form(&self) -> &FilterForm {
        &self.form
    }

    /// Fires once per logical filter change; listeners re-read the filter state.
    pub fn filters_changed(&self) -> &EventBus<()> {
        &self.filters_changed
    }
}

impl Drop for VideoFiltersHeader {
    fn drop(&mut self) {
        self.destroy();
    }
}
