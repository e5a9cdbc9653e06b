use crate::domain::error::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

/// The filter fields mirrored between the filter state and the toolbar form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Sort,
    Nsfw,
    LanguageOneOf,
    CategoryOneOf,
    Scope,
    AllVideos,
    Live,
}

impl FilterField {
    pub const ALL: [FilterField; 7] = [
        FilterField::Sort,
        FilterField::Nsfw,
        FilterField::LanguageOneOf,
        FilterField::CategoryOneOf,
        FilterField::Scope,
        FilterField::AllVideos,
        FilterField::Live,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Sort => "sort",
            FilterField::Nsfw => "nsfw",
            FilterField::LanguageOneOf => "languageOneOf",
            FilterField::CategoryOneOf => "categoryOneOf",
            FilterField::Scope => "scope",
            FilterField::AllVideos => "allVideos",
            FilterField::Live => "live",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|field| field.as_str() == s)
            .copied()
            .ok_or_else(|| FilterError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NsfwFilter {
    #[default]
    #[serde(rename = "both")]
    Both,
    #[serde(rename = "false")]
    Hidden,
}

impl NsfwFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            NsfwFilter::Both => "both",
            NsfwFilter::Hidden => "false",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "both" => Some(NsfwFilter::Both),
            "false" => Some(NsfwFilter::Hidden),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoScope {
    #[default]
    Federated,
    Local,
}

impl VideoScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoScope::Federated => "federated",
            VideoScope::Local => "local",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "federated" => Some(VideoScope::Federated),
            "local" => Some(VideoScope::Local),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LiveFilter {
    #[default]
    #[serde(rename = "both")]
    Both,
    #[serde(rename = "true")]
    Only,
    #[serde(rename = "false")]
    Exclude,
}

impl LiveFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiveFilter::Both => "both",
            LiveFilter::Only => "true",
            LiveFilter::Exclude => "false",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "both" => Some(LiveFilter::Both),
            "true" => Some(LiveFilter::Only),
            "false" => Some(LiveFilter::Exclude),
            _ => None,
        }
    }
}

/// A complete set of filter values, one per [`FilterField`].
///
/// `Default` is the placeholder set the form starts with before it is
/// synchronized: empty sort, empty lists, first variant of every enum.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterValues {
    pub sort: String,
    pub nsfw: NsfwFilter,
    pub language_one_of: Vec<String>,
    pub category_one_of: Vec<u32>,
    pub scope: VideoScope,
    pub all_videos: bool,
    pub live: LiveFilter,
}

impl FilterValues {
    pub fn apply(&mut self, edit: FilterEdit) {
        match edit {
            FilterEdit::Sort(sort) => self.sort = sort,
            FilterEdit::Nsfw(nsfw) => self.nsfw = nsfw,
            FilterEdit::LanguageOneOf(languages) => self.language_one_of = languages,
            FilterEdit::CategoryOneOf(categories) => self.category_one_of = categories,
            FilterEdit::Scope(scope) => self.scope = scope,
            FilterEdit::AllVideos(all_videos) => self.all_videos = all_videos,
            FilterEdit::Live(live) => self.live = live,
        }
    }

    pub fn merge(&mut self, patch: FilterPatch) {
        let FilterPatch {
            sort,
            nsfw,
            language_one_of,
            category_one_of,
            scope,
            all_videos,
            live,
        } = patch;

        if let Some(sort) = sort {
            self.sort = sort;
        }
        if let Some(nsfw) = nsfw {
            self.nsfw = nsfw;
        }
        if let Some(languages) = language_one_of {
            self.language_one_of = languages;
        }
        if let Some(categories) = category_one_of {
            self.category_one_of = categories;
        }
        if let Some(scope) = scope {
            self.scope = scope;
        }
        if let Some(all_videos) = all_videos {
            self.all_videos = all_videos;
        }
        if let Some(live) = live {
            self.live = live;
        }
    }

    /// Copies one field from `source` into `self`.
    pub fn copy_field(&mut self, field: FilterField, source: &FilterValues) {
        match field {
            FilterField::Sort => self.sort = source.sort.clone(),
            FilterField::Nsfw => self.nsfw = source.nsfw,
            FilterField::LanguageOneOf => self.language_one_of = source.language_one_of.clone(),
            FilterField::CategoryOneOf => self.category_one_of = source.category_one_of.clone(),
            FilterField::Scope => self.scope = source.scope,
            FilterField::AllVideos => self.all_videos = source.all_videos,
            FilterField::Live => self.live = source.live,
        }
    }

    pub fn field_eq(&self, field: FilterField, other: &FilterValues) -> bool {
        match field {
            FilterField::Sort => self.sort == other.sort,
            FilterField::Nsfw => self.nsfw == other.nsfw,
            FilterField::LanguageOneOf => self.language_one_of == other.language_one_of,
            FilterField::CategoryOneOf => self.category_one_of == other.category_one_of,
            FilterField::Scope => self.scope == other.scope,
            FilterField::AllVideos => self.all_videos == other.all_videos,
            FilterField::Live => self.live == other.live,
        }
    }

    /// The value of `field` as it appears in a query string.
    pub fn query_value(&self, field: FilterField) -> String {
        match field {
            FilterField::Sort => self.sort.clone(),
            FilterField::Nsfw => self.nsfw.as_str().to_string(),
            FilterField::LanguageOneOf => self.language_one_of.join(","),
            FilterField::CategoryOneOf => self
                .category_one_of
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(","),
            FilterField::Scope => self.scope.as_str().to_string(),
            FilterField::AllVideos => self.all_videos.to_string(),
            FilterField::Live => self.live.as_str().to_string(),
        }
    }
}

/// A single control edit on the toolbar form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEdit {
    Sort(String),
    Nsfw(NsfwFilter),
    LanguageOneOf(Vec<String>),
    CategoryOneOf(Vec<u32>),
    Scope(VideoScope),
    AllVideos(bool),
    Live(LiveFilter),
}

impl FilterEdit {
    pub fn field(&self) -> FilterField {
        match self {
            FilterEdit::Sort(_) => FilterField::Sort,
            FilterEdit::Nsfw(_) => FilterField::Nsfw,
            FilterEdit::LanguageOneOf(_) => FilterField::LanguageOneOf,
            FilterEdit::CategoryOneOf(_) => FilterField::CategoryOneOf,
            FilterEdit::Scope(_) => FilterField::Scope,
            FilterEdit::AllVideos(_) => FilterField::AllVideos,
            FilterEdit::Live(_) => FilterField::Live,
        }
    }
}

/// A partial set of filter values; `None` fields are left untouched on load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterPatch {
    pub sort: Option<String>,
    pub nsfw: Option<NsfwFilter>,
    pub language_one_of: Option<Vec<String>>,
    pub category_one_of: Option<Vec<u32>>,
    pub scope: Option<VideoScope>,
    pub all_videos: Option<bool>,
    pub live: Option<LiveFilter>,
}

impl FilterPatch {
    /// Parses route parameters. Keys that are not filter fields are ignored;
    /// repeated list keys accumulate.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut patch = FilterPatch::default();

        for (key, value) in pairs {
            let Ok(field) = key.as_ref().parse::<FilterField>() else {
                continue;
            };
            let value = value.as_ref().trim();

            match field {
                FilterField::Sort => {
                    if value.is_empty() {
                        return Err(FilterError::invalid(field, value));
                    }
                    patch.sort = Some(value.to_string());
                }
                FilterField::Nsfw => {
                    let nsfw =
                        NsfwFilter::parse(value).ok_or_else(|| FilterError::invalid(field, value))?;
                    patch.nsfw = Some(nsfw);
                }
                FilterField::LanguageOneOf => {
                    patch
                        .language_one_of
                        .get_or_insert_with(Vec::new)
                        .extend(split_list(value).map(str::to_string));
                }
                FilterField::CategoryOneOf => {
                    let categories = patch.category_one_of.get_or_insert_with(Vec::new);
                    for item in split_list(value) {
                        let id = item
                            .parse::<u32>()
                            .map_err(|_| FilterError::invalid(field, item))?;
                        categories.push(id);
                    }
                }
                FilterField::Scope => {
                    let scope =
                        VideoScope::parse(value).ok_or_else(|| FilterError::invalid(field, value))?;
                    patch.scope = Some(scope);
                }
                FilterField::AllVideos => {
                    let all_videos = value
                        .parse::<bool>()
                        .map_err(|_| FilterError::invalid(field, value))?;
                    patch.all_videos = Some(all_videos);
                }
                FilterField::Live => {
                    let live =
                        LiveFilter::parse(value).ok_or_else(|| FilterError::invalid(field, value))?;
                    patch.live = Some(live);
                }
            }
        }

        Ok(patch)
    }

    /// Parses an `application/x-www-form-urlencoded` query string.
    pub fn from_query(query: &str) -> Result<Self, FilterError> {
        Self::from_query_pairs(form_urlencoded::parse(query.trim_start_matches('?').as_bytes()))
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty())
}

impl From<FilterValues> for FilterPatch {
    fn from(values: FilterValues) -> Self {
        Self {
            sort: Some(values.sort),
            nsfw: Some(values.nsfw),
            language_one_of: Some(values.language_one_of),
            category_one_of: Some(values.category_one_of),
            scope: Some(values.scope),
            all_videos: Some(values.all_videos),
            live: Some(values.live),
        }
    }
}
