//! The chainable, immutable transformation state.
//!
//! Every directive setter returns a new [`Yoot`]; the receiver is never
//! altered. The URL is resolved lazily on first request and memoized for the
//! instance:
//!
//! ```text
//! src → registry.resolve → adapter.prime_state → normalize_directives → adapter.generate_url
//! ```

use crate::adapter::{AdapterRegistry, GenerateUrlInput, PrimeStateInput};
use crate::error::{Result, ValidationError, YootError};
use crate::normalize::normalize_directives;
use crate::types::{Crop, Directive, Directives, Fit, Format, YootState};
use crate::validate::{is_dimension, is_url, parse_url};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Anything a [`Yoot`] can be built or patched from.
///
/// Strings are interpreted leniently: a URL becomes the source, anything
/// else is parsed as serialized state field by field, and unparseable input
/// is an empty state rather than an error. Fields and directives that don't
/// fit their type are skipped individually.
#[derive(Debug, Clone, Default)]
pub enum YootInput {
    #[default]
    Empty,
    Str(String),
    State(YootState),
}

impl From<()> for YootInput {
    fn from(_: ()) -> Self {
        Self::Empty
    }
}

impl From<&str> for YootInput {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for YootInput {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<YootState> for YootInput {
    fn from(state: YootState) -> Self {
        Self::State(state)
    }
}

impl From<&YootState> for YootInput {
    fn from(state: &YootState) -> Self {
        Self::State(state.clone())
    }
}

impl From<&Yoot> for YootInput {
    fn from(yoot: &Yoot) -> Self {
        Self::State(yoot.to_json())
    }
}

/// Memoized resolution output.
#[derive(Debug, Clone)]
struct Resolved {
    url: String,
    directives: Directives,
}

/// An immutable image transformation.
///
/// [`url`](Self::url) is the API for producing URLs. `Display` is meant for
/// logging and string interpolation only: it writes nothing when
/// resolution fails.
#[derive(Clone, Default)]
pub struct Yoot {
    state: YootState,
    registry: Option<Arc<AdapterRegistry>>,
    resolved: OnceCell<Resolved>,
}

/// Create a new transformation. Shorthand for [`Yoot::new`].
pub fn yoot(input: impl Into<YootInput>) -> Yoot {
    Yoot::new(input)
}

impl Yoot {
    /// Create a new transformation bound to the process-wide registry.
    ///
    /// Construction never fails. Whatever the input form, a directive
    /// outside its domain is dropped and the rest of the state is kept.
    pub fn new(input: impl Into<YootInput>) -> Self {
        let mut state = unwrap_input(input.into());
        state.directives = state.directives.valid_only();
        let state = derive_state(&YootState::default(), &state);
        Self {
            state,
            ..Self::default()
        }
    }

    /// Bind this transformation (and everything derived from it) to an
    /// explicit registry instead of the process-wide one.
    pub fn with_registry(&self, registry: Arc<AdapterRegistry>) -> Self {
        Self {
            state: self.state.clone(),
            registry: Some(registry),
            resolved: OnceCell::new(),
        }
    }

    fn derive(&self, state: YootState) -> Self {
        Self {
            state,
            registry: self.registry.clone(),
            resolved: OnceCell::new(),
        }
    }

    fn with_directive(
        &self,
        directive: Option<Directive>,
        clear: fn(&mut Directives),
    ) -> std::result::Result<Self, ValidationError> {
        let mut state = self.state.clone();
        match directive {
            Some(directive) => {
                directive.validate()?;
                state.directives.set(directive);
            }
            None => clear(&mut state.directives),
        }
        Ok(self.derive(state))
    }

    // --- Image metadata ---

    /// Set the image source URL.
    pub fn src(&self, src: &str) -> std::result::Result<Self, ValidationError> {
        if !is_url(src) {
            return Err(ValidationError::InvalidSource(src.to_string()));
        }
        Ok(self.derive(YootState {
            src: Some(src.to_string()),
            ..self.state.clone()
        }))
    }

    /// Set the image alt text.
    pub fn alt(&self, alt: impl Into<String>) -> Self {
        self.derive(YootState {
            alt: Some(alt.into()),
            ..self.state.clone()
        })
    }

    // --- Directives ---
    //
    // `None` removes the directive and is never validated.

    pub fn aspect_ratio(
        &self,
        value: impl Into<Option<f64>>,
    ) -> std::result::Result<Self, ValidationError> {
        self.with_directive(value.into().map(Directive::AspectRatio), |d| {
            d.aspect_ratio = None
        })
    }

    /// Alias for [`aspect_ratio`](Self::aspect_ratio).
    pub fn ar(&self, value: impl Into<Option<f64>>) -> std::result::Result<Self, ValidationError> {
        self.aspect_ratio(value)
    }

    pub fn crop(&self, value: impl Into<Option<Crop>>) -> std::result::Result<Self, ValidationError> {
        self.with_directive(value.into().map(Directive::Crop), |d| d.crop = None)
    }

    pub fn dpr(&self, value: impl Into<Option<f64>>) -> std::result::Result<Self, ValidationError> {
        self.with_directive(value.into().map(Directive::Dpr), |d| d.dpr = None)
    }

    pub fn fit(&self, value: impl Into<Option<Fit>>) -> std::result::Result<Self, ValidationError> {
        self.with_directive(value.into().map(Directive::Fit), |d| d.fit = None)
    }

    pub fn format(
        &self,
        value: impl Into<Option<Format>>,
    ) -> std::result::Result<Self, ValidationError> {
        self.with_directive(value.into().map(Directive::Format), |d| d.format = None)
    }

    /// Alias for [`format`](Self::format).
    pub fn fm(&self, value: impl Into<Option<Format>>) -> std::result::Result<Self, ValidationError> {
        self.format(value)
    }

    pub fn height(&self, value: impl Into<Option<f64>>) -> std::result::Result<Self, ValidationError> {
        self.with_directive(value.into().map(Directive::Height), |d| d.height = None)
    }

    /// Alias for [`height`](Self::height).
    pub fn h(&self, value: impl Into<Option<f64>>) -> std::result::Result<Self, ValidationError> {
        self.height(value)
    }

    pub fn quality(
        &self,
        value: impl Into<Option<f64>>,
    ) -> std::result::Result<Self, ValidationError> {
        self.with_directive(value.into().map(Directive::Quality), |d| d.quality = None)
    }

    /// Alias for [`quality`](Self::quality).
    pub fn q(&self, value: impl Into<Option<f64>>) -> std::result::Result<Self, ValidationError> {
        self.quality(value)
    }

    pub fn width(&self, value: impl Into<Option<f64>>) -> std::result::Result<Self, ValidationError> {
        self.with_directive(value.into().map(Directive::Width), |d| d.width = None)
    }

    /// Alias for [`width`](Self::width).
    pub fn w(&self, value: impl Into<Option<f64>>) -> std::result::Result<Self, ValidationError> {
        self.width(value)
    }

    // --- State updates ---

    /// Merge a patch into the current state.
    ///
    /// Patch fields win; directives merge key by key. Top-level fields whose
    /// patch value is unusable (a non-URL `src`, a non-positive dimension)
    /// keep their current value. Directive values in a structured patch are
    /// validated.
    pub fn with_patch(
        &self,
        input: impl Into<YootInput>,
    ) -> std::result::Result<Self, ValidationError> {
        let patch = unwrap_input(input.into());
        patch.directives.validate()?;
        Ok(self.derive(derive_state(&self.state, &patch)))
    }

    /// Edit several fields at once.
    ///
    /// The callback receives a copy of the full state and its return value
    /// becomes the new state, subject to the same validation as `with_patch`.
    ///
    /// ```rust,ignore
    /// let next = image.map(|mut state| {
    ///     state.alt.get_or_insert_with(|| "Fallback alt".into());
    ///     state.directives.format = Some(Format::Webp);
    ///     state.directives.quality = Some(75.0);
    ///     state
    /// })?;
    /// ```
    pub fn map<F>(&self, f: F) -> std::result::Result<Self, ValidationError>
    where
        F: FnOnce(YootState) -> YootState,
    {
        let next = f(self.state.clone());
        next.directives.validate()?;
        Ok(self.derive(derive_state(&YootState::default(), &next)))
    }

    // --- Output ---

    /// The transformed image URL.
    ///
    /// Computed once per instance; later calls return the memoized value
    /// without consulting the adapter again.
    pub fn url(&self) -> Result<String> {
        self.resolved
            .get_or_try_init(|| self.resolve())
            .map(|resolved| resolved.url.clone())
    }

    fn resolve(&self) -> Result<Resolved> {
        let raw_src = self.state.src.clone().ok_or(YootError::MissingSource)?;
        let src = parse_url(&raw_src).ok_or(YootError::MissingSource)?;

        let adapter = self.registry().resolve(&src)?;

        let primed = adapter.prime_state(PrimeStateInput {
            src: src.clone(),
            alt: self.state.alt.clone(),
            width: self.state.width,
            height: self.state.height,
            directives: self.state.directives,
        });
        let directives = normalize_directives(&primed);
        let url = adapter.generate_url(&GenerateUrlInput {
            src,
            raw_src,
            directives,
        });

        tracing::trace!(adapter = adapter.name(), url = %url, "Generated URL");
        Ok(Resolved { url, directives })
    }

    /// The source URL with the adapter's transformations stripped.
    ///
    /// Best effort: `None` when there is no usable source or no adapter.
    pub fn base_url(&self) -> Option<String> {
        let raw_src = self.state.src.as_deref()?;
        let src = parse_url(raw_src)?;
        let adapter = self.registry().resolve(&src).ok()?;
        Some(adapter.normalize_source(raw_src, &src))
    }

    /// True if a source URL is set.
    pub fn has_src(&self) -> bool {
        self.state.src.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// A snapshot of the current state.
    ///
    /// Once a URL has been generated, the normalized directives are reported
    /// instead of the raw ones.
    pub fn to_json(&self) -> YootState {
        let mut state = self.state.clone();
        if let Some(resolved) = self.resolved.get() {
            state.directives = resolved.directives;
        }
        state
    }

    /// The snapshot serialized as JSON, suitable for [`Yoot::new`].
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_json())?)
    }

    /// Directives as currently stored (before normalization).
    pub fn directives(&self) -> &Directives {
        &self.state.directives
    }

    /// The registry this transformation resolves against.
    pub fn registry(&self) -> Arc<AdapterRegistry> {
        self.registry
            .clone()
            .unwrap_or_else(AdapterRegistry::global)
    }
}

impl fmt::Display for Yoot {
    /// Writes the generated URL, or nothing if resolution fails. Use
    /// [`Yoot::url`] to observe the error.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.url() {
            Ok(url) => f.write_str(&url),
            Err(_) => Ok(()),
        }
    }
}

impl fmt::Debug for Yoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Yoot")
            .field("state", &self.state)
            .field("isolated_registry", &self.registry.is_some())
            .field("resolved", &self.resolved.get().map(|r| &r.url))
            .finish()
    }
}

impl Serialize for Yoot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Turn any input into a (possibly partial) state.
fn unwrap_input(input: YootInput) -> YootState {
    match input {
        YootInput::Empty => YootState::default(),
        YootInput::State(state) => state,
        YootInput::Str(s) if is_url(&s) => YootState::from_src(s),
        YootInput::Str(s) => parse_state(&s).unwrap_or_else(|| {
            tracing::trace!("Ignoring unparseable state input");
            YootState::default()
        }),
    }
}

/// Parse serialized state one field at a time.
///
/// Returns `None` unless the input is a JSON object. A field, or a single
/// directive, whose value doesn't deserialize is skipped on its own.
fn parse_state(s: &str) -> Option<YootState> {
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(s) else {
        return None;
    };

    let mut state = YootState::default();
    for (key, value) in fields {
        if key == "directives" {
            let Value::Object(directives) = value else {
                continue;
            };
            for (name, value) in directives {
                if let Some(directive) = parse_field::<Directives>(name, value) {
                    state.directives = state.directives.merge(&directive);
                }
            }
        } else if let Some(field) = parse_field::<YootState>(key, value) {
            state = derive_state(&state, &field);
        }
    }
    Some(state)
}

/// Deserialize a single `{ key: value }` pair into `T`.
fn parse_field<T: DeserializeOwned>(key: String, value: Value) -> Option<T> {
    let single = Value::Object(Map::from_iter([(key, value)]));
    match serde_json::from_value(single) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::trace!(error = %e, "Skipping state field");
            None
        }
    }
}

/// Merge `next` into `current`, keeping only values valid for their field.
fn derive_state(current: &YootState, next: &YootState) -> YootState {
    let src = |s: &Option<String>| s.clone().filter(|s| is_url(s));
    let dim = |d: Option<f64>| d.filter(|d| is_dimension(*d));

    YootState {
        src: src(&next.src).or_else(|| src(&current.src)),
        alt: next.alt.clone().or_else(|| current.alt.clone()),
        width: dim(next.width).or(dim(current.width)),
        height: dim(next.height).or(dim(current.height)),
        directives: current.directives.merge(&next.directives),
    }
}
