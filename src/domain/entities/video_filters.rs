use crate::domain::entities::{
    DEFAULT_SORT, FilterField, FilterPatch, FilterValues, HeaderConfig, LiveFilter, NsfwFilter,
    NsfwPolicy, VideoScope,
};
use crate::domain::error::FilterError;
use crate::domain::gateways::{ChangeListener, FilterState};
use crate::domain::services::{EventBus, Subscription};
use std::sync::{Mutex, MutexGuard, PoisonError};
use url::form_urlencoded;

/// One filter chip shown above the video list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub field: FilterField,
    pub label: String,
    /// True when the value differs from its default, so resetting it changes something.
    pub can_remove: bool,
}

struct Inner {
    values: FilterValues,
    defaults: FilterValues,
}

/// In-memory video filter model.
pub struct VideoFilters {
    inner: Mutex<Inner>,
    changes: EventBus<(), FilterError>,
}

impl VideoFilters {
    pub fn new(default_sort: impl Into<String>, default_scope: VideoScope) -> Self {
        let defaults = FilterValues {
            sort: default_sort.into(),
            nsfw: NsfwFilter::Both,
            language_one_of: Vec::new(),
            category_one_of: Vec::new(),
            scope: default_scope,
            all_videos: false,
            live: LiveFilter::Both,
        };

        Self {
            inner: Mutex::new(Inner {
                values: defaults.clone(),
                defaults,
            }),
            changes: EventBus::new(),
        }
    }

    pub fn from_config(config: &HeaderConfig) -> Self {
        let filters = Self::new(config.default_sort.clone(), config.default_scope);
        filters.set_nsfw_policy(config.nsfw_policy);
        filters
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Changes the NSFW default. A current value still at the old default
    /// follows the new one. Listeners are not notified.
    pub fn set_nsfw_policy(&self, policy: NsfwPolicy) {
        let mut inner = self.inner();
        let nsfw = policy.default_filter();

        if inner.values.nsfw == inner.defaults.nsfw {
            inner.values.nsfw = nsfw;
        }
        inner.defaults.nsfw = nsfw;
    }

    pub fn defaults(&self) -> FilterValues {
        self.inner().defaults.clone()
    }

    pub fn values(&self) -> FilterValues {
        self.inner().values.clone()
    }

    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let inner = self.inner();

        FilterField::ALL
            .into_iter()
            .filter(|field| *field != FilterField::Sort)
            .map(|field| ActiveFilter {
                field,
                label: filter_label(&inner.values, field),
                can_remove: !inner.values.field_eq(field, &inner.defaults),
            })
            .collect()
    }

    /// Non-default values as query parameters, in field order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let inner = self.inner();

        FilterField::ALL
            .into_iter()
            .filter(|field| !inner.values.field_eq(*field, &inner.defaults))
            .map(|field| (field.as_str(), inner.values.query_value(field)))
            .collect()
    }

    /// Non-default values as an encoded query string.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_query_pairs())
            .finish()
    }

    pub fn listener_count(&self) -> usize {
        self.changes.listener_count()
    }

    pub fn load_query(&self, query: &str) -> Result<(), FilterError> {
        self.load(FilterPatch::from_query(query)?)
    }

    fn notify(&self) -> Result<(), FilterError> {
        let listeners = self.changes.publish(&())?;
        tracing::trace!(listeners, "Notified filter listeners");
        Ok(())
    }
}

impl Default for VideoFilters {
    fn default() -> Self {
        Self::new(DEFAULT_SORT, VideoScope::Federated)
    }
}

impl FilterState for VideoFilters {
    fn on_change(&self, listener: ChangeListener) -> Subscription {
        self.changes.subscribe(move |_| listener())
    }

    fn load(&self, patch: FilterPatch) -> Result<(), FilterError> {
        {
            let mut inner = self.inner();
            inner.values.merge(patch);
        }
        self.notify()
    }

    fn reset(&self, field: FilterField) -> Result<(), FilterError> {
        {
            let mut inner = self.inner();
            let Inner { values, defaults } = &mut *inner;
            values.copy_field(field, defaults);
        }
        self.notify()
    }

    fn to_form_object(&self) -> Result<FilterValues, FilterError> {
        Ok(self.values())
    }
}

fn filter_label(values: &FilterValues, field: FilterField) -> String {
    match field {
        FilterField::Sort => format!("Sort: {}", values.sort),
        FilterField::Nsfw => match values.nsfw {
            NsfwFilter::Both => "Sensitive content displayed".to_string(),
            NsfwFilter::Hidden => "Sensitive content hidden".to_string(),
        },
        FilterField::LanguageOneOf if values.language_one_of.is_empty() => {
            "All languages".to_string()
        }
        FilterField::LanguageOneOf => format!("Languages: {}", values.language_one_of.join(", ")),
        FilterField::CategoryOneOf if values.category_one_of.is_empty() => {
            "All categories".to_string()
        }
        FilterField::CategoryOneOf => format!(
            "Categories: {}",
            values.query_value(FilterField::CategoryOneOf).replace(',', ", ")
        ),
        FilterField::Scope => match values.scope {
            VideoScope::Federated => "Federated videos".to_string(),
            VideoScope::Local => "Local videos".to_string(),
        },
        FilterField::AllVideos if values.all_videos => "All videos".to_string(),
        FilterField::AllVideos => "Published videos".to_string(),
        FilterField::Live => match values.live {
            LiveFilter::Both => "Live and VOD videos".to_string(),
            LiveFilter::Only => "Live videos only".to_string(),
            LiveFilter::Exclude => "VOD videos only".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_listener(filters: &VideoFilters) -> (Arc<AtomicUsize>, Subscription) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let subscription = filters.on_change(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }));
        (calls, subscription)
    }

    #[test]
    fn test_defaults_from_config() {
        let filters = VideoFilters::from_config(&HeaderConfig {
            default_sort: "-trending".to_string(),
            default_scope: VideoScope::Local,
            nsfw_policy: NsfwPolicy::DoNotList,
            ..HeaderConfig::default()
        });

        let values = filters.to_form_object().unwrap();
        assert_eq!(values.sort, "-trending");
        assert_eq!(values.scope, VideoScope::Local);
        assert_eq!(values.nsfw, NsfwFilter::Hidden);
        assert!(values.language_one_of.is_empty());
    }

    #[test]
    fn test_load_notifies_once() {
        let filters = VideoFilters::default();
        let (calls, _subscription) = counting_listener(&filters);

        filters
            .load(FilterPatch {
                language_one_of: Some(vec!["en".to_string()]),
                live: Some(LiveFilter::Only),
                ..FilterPatch::default()
            })
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let values = filters.values();
        assert_eq!(values.language_one_of, vec!["en".to_string()]);
        assert_eq!(values.live, LiveFilter::Only);
        assert_eq!(values.sort, DEFAULT_SORT);
    }

    #[test]
    fn test_reset_restores_default_and_notifies() {
        let filters = VideoFilters::default();
        filters.load_query("languageOneOf=en&scope=local").unwrap();
        let (calls, _subscription) = counting_listener(&filters);

        filters.reset(FilterField::LanguageOneOf).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let values = filters.values();
        assert!(values.language_one_of.is_empty());
        assert_eq!(values.scope, VideoScope::Local);
    }

    #[test]
    fn test_listener_can_read_state_during_notification() {
        let filters = Arc::new(VideoFilters::default());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let reader = Arc::downgrade(&filters);
        let log = Arc::clone(&seen);
        let _subscription = filters.on_change(Box::new(move || {
            if let Some(filters) = reader.upgrade() {
                let values = filters.to_form_object()?;
                log.lock().unwrap().push(values.sort);
            }
            Ok(())
        }));

        filters.load_query("sort=-hot").unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["-hot".to_string()]);
    }

    #[test]
    fn test_listener_error_propagates_from_load() {
        let filters = VideoFilters::default();
        let _subscription = filters.on_change(Box::new(|| {
            Err(FilterError::Unavailable("listener failed".to_string()))
        }));

        let result = filters.load(FilterPatch::default());
        assert_eq!(
            result,
            Err(FilterError::Unavailable("listener failed".to_string()))
        );
    }

    #[test]
    fn test_active_filters_mark_removable() {
        let filters = VideoFilters::default();
        filters.load_query("languageOneOf=en&live=true").unwrap();

        let chips = filters.active_filters();
        assert_eq!(chips.len(), 6);
        assert!(chips.iter().all(|chip| chip.field != FilterField::Sort));

        let removable: Vec<FilterField> = chips
            .iter()
            .filter(|chip| chip.can_remove)
            .map(|chip| chip.field)
            .collect();
        assert_eq!(removable, vec![FilterField::LanguageOneOf, FilterField::Live]);

        let languages = chips
            .iter()
            .find(|chip| chip.field == FilterField::LanguageOneOf)
            .unwrap();
        assert_eq!(languages.label, "Languages: en");
    }

    #[test]
    fn test_query_pairs_only_export_non_defaults() {
        let filters = VideoFilters::default();
        assert!(filters.to_query_pairs().is_empty());

        filters
            .load_query("sort=-hot&categoryOneOf=1,4&allVideos=true")
            .unwrap();

        assert_eq!(
            filters.to_query_pairs(),
            vec![
                ("sort", "-hot".to_string()),
                ("categoryOneOf", "1,4".to_string()),
                ("allVideos", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_string_round_trips_through_encoding() {
        let source = VideoFilters::default();
        source
            .load(FilterPatch {
                sort: Some("-hot".to_string()),
                language_one_of: Some(vec!["en".to_string(), "pt-BR".to_string()]),
                category_one_of: Some(vec![1, 4]),
                scope: Some(VideoScope::Local),
                ..FilterPatch::default()
            })
            .unwrap();

        let query = source.to_query_string();
        assert_eq!(
            query,
            "sort=-hot&languageOneOf=en%2Cpt-BR&categoryOneOf=1%2C4&scope=local"
        );

        let target = VideoFilters::default();
        target.load_query(&query).unwrap();
        assert_eq!(target.values(), source.values());
    }

    #[test]
    fn test_nsfw_policy_moves_untouched_value() {
        let filters = VideoFilters::default();
        filters.set_nsfw_policy(NsfwPolicy::DoNotList);
        assert_eq!(filters.values().nsfw, NsfwFilter::Hidden);

        filters.load_query("nsfw=both").unwrap();
        filters.set_nsfw_policy(NsfwPolicy::Blur);
        assert_eq!(filters.values().nsfw, NsfwFilter::Both);
        assert_eq!(filters.defaults().nsfw, NsfwFilter::Both);
    }

    #[test]
    fn test_invalid_query_leaves_state_untouched() {
        let filters = VideoFilters::default();
        let (calls, _subscription) = counting_listener(&filters);

        assert!(filters.load_query("scope=everywhere").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(filters.values(), filters.defaults());
    }
}
