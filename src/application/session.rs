// SPDX-License-Identifier: MPL-2.0
//! Per-image session orchestration.
//!
//! A [`Session`] owns the current [`LocationSet`], the [`SelectionStore`] and
//! the uploaded image. External events (upload started, result arrived, map
//! click, image removed) are applied one at a time in arrival order, so a
//! location set replacement, including its selection re-derivation, is
//! complete before any later click is looked at.
//!
//! Every upload gets a fresh [`UploadToken`]. A result carrying an older
//! token is dropped on arrival.

use crate::application::port::{GeotagWriter, MapRenderer};
use crate::domain::location::{CandidateRef, LocationSet};
use crate::domain::map_view::{derive_view, CameraTransition, MapSettings, MapView, RenderFrame};
use crate::domain::selection::{Selection, SelectionError, SelectionStore};
use crate::domain::tagging::{TaggingError, TaggingRequest, UploadedImage};
use crate::error::Result;
use crate::payload::UploadResult;

/// Generation token handed out by [`Session::begin_upload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UploadToken(u64);

impl UploadToken {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Whether an arriving result (or failure) was taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOutcome {
    Applied,
    /// The token belongs to an upload that was superseded or removed.
    Stale,
}

/// External events, in the order they reach the session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    UploadStarted(UploadedImage),
    ResultArrived {
        token: UploadToken,
        result: UploadResult,
    },
    UploadFailed(UploadToken),
    SelectLocation(CandidateRef),
    RemoveImage,
}

/// What a dispatched event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Started(UploadToken),
    Result(ResultOutcome),
    Selected,
    Removed,
}

#[derive(Debug, Clone)]
pub struct Session {
    settings: MapSettings,
    location_set: LocationSet,
    /// Bumped on every location set replacement.
    set_revision: u64,
    selection: SelectionStore,
    generation: u64,
    pending: Option<UploadToken>,
    image: Option<UploadedImage>,
    message: Option<String>,
    /// Set revision of the last frame handed to a renderer.
    last_painted: Option<u64>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(MapSettings::default())
    }
}

impl Session {
    #[must_use]
    pub fn new(settings: MapSettings) -> Self {
        Self {
            settings,
            location_set: LocationSet::empty(),
            set_revision: 0,
            selection: SelectionStore::new(),
            generation: 0,
            pending: None,
            image: None,
            message: None,
            last_painted: None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    #[must_use]
    pub fn location_set(&self) -> &LocationSet {
        &self.location_set
    }

    #[must_use]
    pub fn set_revision(&self) -> u64 {
        self.set_revision
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        self.selection.current()
    }

    #[must_use]
    pub fn selection_revision(&self) -> u64 {
        self.selection.revision()
    }

    #[must_use]
    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    /// Status line from the last applied result.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns `true` while an upload is waiting for its result.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.pending.is_some()
    }

    // =========================================================================
    // Upload lifecycle
    // =========================================================================

    /// Starts a new upload, discarding anything from the previous one.
    ///
    /// The location set is cleared right away so no stale markers remain
    /// while the new image is processed.
    pub fn begin_upload(&mut self, image: UploadedImage) -> UploadToken {
        self.generation += 1;
        let token = UploadToken(self.generation);
        tracing::info!(
            token = token.value(),
            file = %image.file_name,
            "upload started"
        );
        self.pending = Some(token);
        self.image = Some(image);
        self.message = None;
        self.replace_location_set(LocationSet::empty());
        token
    }

    /// Installs the processing result for `token`.
    ///
    /// Results for any token other than the latest pending one are dropped.
    pub fn apply_result(&mut self, token: UploadToken, result: &UploadResult) -> ResultOutcome {
        if !self.take_pending(token) {
            tracing::debug!(
                token = token.value(),
                current = self.generation,
                "discarding stale upload result"
            );
            return ResultOutcome::Stale;
        }

        let set = result.to_location_set();
        tracing::info!(
            token = token.value(),
            exact = set.exact().is_some(),
            candidates = set.candidates().len(),
            "upload result applied"
        );
        self.message = result.message.clone();
        self.replace_location_set(set);
        ResultOutcome::Applied
    }

    /// Records that processing for `token` failed.
    ///
    /// The location set is left as it is; nothing is fabricated.
    pub fn fail_upload(&mut self, token: UploadToken) -> ResultOutcome {
        if !self.take_pending(token) {
            tracing::debug!(token = token.value(), "ignoring failure of stale upload");
            return ResultOutcome::Stale;
        }
        tracing::warn!(token = token.value(), "upload processing failed");
        ResultOutcome::Applied
    }

    /// Drops the image and everything derived from it.
    ///
    /// Also invalidates the pending upload, so its result is discarded.
    pub fn remove_image(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.image = None;
        self.message = None;
        self.replace_location_set(LocationSet::empty());
        tracing::info!("image removed");
    }

    fn take_pending(&mut self, token: UploadToken) -> bool {
        if self.pending == Some(token) && token.value() == self.generation {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Replaces the location set and re-derives the selection before
    /// returning. Only the upload lifecycle above may call this.
    fn replace_location_set(&mut self, set: LocationSet) {
        self.location_set = set;
        self.set_revision += 1;
        let selection = self.selection.reconcile(&self.location_set);
        tracing::debug!(
            set_revision = self.set_revision,
            source = ?selection.source(),
            "location set replaced"
        );
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Applies a user click on a marker or list row.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownCandidate`] if `target` is not in
    /// the current location set; the selection is left untouched.
    pub fn select_location(
        &mut self,
        target: &CandidateRef,
    ) -> std::result::Result<&Selection, SelectionError> {
        self.selection.select(&self.location_set, target)
    }

    // =========================================================================
    // Map
    // =========================================================================

    #[must_use]
    pub fn view(&self) -> MapView {
        derive_view(&self.location_set, self.selection.current(), &self.settings)
    }

    /// The frame to paint next.
    ///
    /// Flies when the painted set is still the current one, jumps otherwise.
    #[must_use]
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            view: self.view(),
            transition: CameraTransition::for_revisions(
                self.last_painted,
                self.set_revision,
                &self.settings,
            ),
        }
    }

    /// Hands the current frame to `renderer`.
    pub fn sync_map<R: MapRenderer + ?Sized>(&mut self, renderer: &mut R) {
        let frame = self.render_frame();
        renderer.render(&frame);
        self.last_painted = Some(self.set_revision);
    }

    // =========================================================================
    // Tagging
    // =========================================================================

    /// Builds a tagging request for the current selection.
    ///
    /// # Errors
    ///
    /// Returns [`TaggingError::NoImage`] without an uploaded image and
    /// [`TaggingError::NoSelection`] when nothing is selected.
    pub fn tagging_request(&self) -> std::result::Result<TaggingRequest, TaggingError> {
        let image = self.image.as_ref().ok_or(TaggingError::NoImage)?;
        TaggingRequest::build(self.selection.current(), self.selection.revision(), image)
    }

    /// Sends `request` to `writer` and keeps the tagged copy as the
    /// session image.
    ///
    /// # Errors
    ///
    /// Fails with [`TaggingError::StaleRequest`] if the selection changed
    /// after `request` was built, or with the writer's error.
    pub fn submit_tagging<W: GeotagWriter + ?Sized>(
        &mut self,
        request: &TaggingRequest,
        writer: &mut W,
    ) -> Result<&UploadedImage> {
        let current_revision = self.selection.revision();
        if request.selection_revision != current_revision {
            tracing::warn!(
                request_revision = request.selection_revision,
                current_revision,
                "refusing stale tagging request"
            );
            return Err(TaggingError::StaleRequest {
                request_revision: request.selection_revision,
                current_revision,
            }
            .into());
        }

        let image = self.image.as_ref().ok_or(TaggingError::NoImage)?;
        let bytes = writer.write_geotag(image, request).map_err(|e| {
            tracing::warn!(error = %e, "geotag write failed");
            e
        })?;

        tracing::info!(
            output = %request.output_name,
            source = %request.source_label,
            "image geotagged"
        );
        Ok(&*self
            .image
            .insert(UploadedImage::new(request.output_name.clone(), bytes)))
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Applies one external event.
    ///
    /// # Errors
    ///
    /// Only a click on an unknown candidate fails; every other event is
    /// always accepted (stale results are reported, not rejected).
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<EventOutcome> {
        match event {
            SessionEvent::UploadStarted(image) => Ok(EventOutcome::Started(self.begin_upload(image))),
            SessionEvent::ResultArrived { token, result } => {
                Ok(EventOutcome::Result(self.apply_result(token, &result)))
            }
            SessionEvent::UploadFailed(token) => Ok(EventOutcome::Result(self.fail_upload(token))),
            SessionEvent::SelectLocation(target) => {
                self.select_location(&target)?;
                Ok(EventOutcome::Selected)
            }
            SessionEvent::RemoveImage => {
                self.remove_image();
                Ok(EventOutcome::Removed)
            }
        }
    }

    /// Applies `events` strictly in order.
    ///
    /// A rejected event does not stop the ones after it.
    pub fn dispatch_all<I>(&mut self, events: I) -> Vec<Result<EventOutcome>>
    where
        I: IntoIterator<Item = SessionEvent>,
    {
        events
            .into_iter()
            .map(|event| {
                let outcome = self.dispatch(event);
                if let Err(e) = &outcome {
                    tracing::warn!(error = %e, "event rejected");
                }
                outcome
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::GeotagError;
    use crate::domain::location::Coordinate;
    use crate::domain::map_view::ViewFocus;
    use crate::domain::selection::SelectionSource;
    use crate::error::Error;
    use crate::test_utils::{demo_candidates, demo_payload};
    use serde_json::json;

    fn image() -> UploadedImage {
        UploadedImage::new("photo.jpg", vec![0xFF, 0xD8, 0xFF, 0xD9])
    }

    fn result(value: serde_json::Value) -> UploadResult {
        UploadResult::from_value(value).expect("object payload")
    }

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<RenderFrame>,
    }

    impl MapRenderer for RecordingRenderer {
        fn render(&mut self, frame: &RenderFrame) {
            self.frames.push(frame.clone());
        }
    }

    struct AppendingWriter;

    impl GeotagWriter for AppendingWriter {
        fn write_geotag(
            &mut self,
            image: &UploadedImage,
            _request: &TaggingRequest,
        ) -> std::result::Result<Vec<u8>, GeotagError> {
            let mut bytes = image.bytes.clone();
            bytes.extend_from_slice(b"GPS");
            Ok(bytes)
        }
    }

    struct FailingWriter;

    impl GeotagWriter for FailingWriter {
        fn write_geotag(
            &mut self,
            _image: &UploadedImage,
            _request: &TaggingRequest,
        ) -> std::result::Result<Vec<u8>, GeotagError> {
            Err(GeotagError::UnsupportedFormat)
        }
    }

    #[test]
    fn new_session_shows_fallback() {
        let session = Session::default();
        let view = session.view();
        assert_eq!(view.focus, ViewFocus::Fallback);
        assert!(view.markers.is_empty());
        assert_eq!(session.selection(), &Selection::None);
    }

    #[test]
    fn result_auto_selects_top_candidate() {
        let mut session = Session::default();
        let token = session.begin_upload(image());
        assert!(session.is_processing());

        let outcome = session.apply_result(token, &demo_payload(false));
        assert_eq!(outcome, ResultOutcome::Applied);
        assert!(!session.is_processing());
        assert_eq!(session.selection().source(), SelectionSource::Auto);
        assert_eq!(session.view().center, demo_candidates()[0].coordinate());
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut session = Session::default();
        let first = session.begin_upload(image());
        let second = session.begin_upload(UploadedImage::new("other.jpg", vec![1]));

        assert_eq!(
            session.apply_result(first, &demo_payload(false)),
            ResultOutcome::Stale
        );
        assert!(session.location_set().is_empty());
        assert!(session.is_processing());

        assert_eq!(
            session.apply_result(second, &result(json!({}))),
            ResultOutcome::Applied
        );
        assert!(session.location_set().is_empty());
    }

    #[test]
    fn duplicate_result_for_same_token_is_stale() {
        let mut session = Session::default();
        let token = session.begin_upload(image());
        session.apply_result(token, &demo_payload(false));
        assert_eq!(
            session.apply_result(token, &result(json!({}))),
            ResultOutcome::Stale
        );
        assert_eq!(session.location_set().candidates().len(), 3);
    }

    #[test]
    fn result_after_remove_is_discarded() {
        let mut session = Session::default();
        let token = session.begin_upload(image());
        session.remove_image();

        assert_eq!(
            session.apply_result(token, &demo_payload(false)),
            ResultOutcome::Stale
        );
        assert!(session.image().is_none());
        assert!(session.location_set().is_empty());
    }

    #[test]
    fn failed_upload_leaves_set_empty() {
        let mut session = Session::default();
        let token = session.begin_upload(image());
        assert_eq!(session.fail_upload(token), ResultOutcome::Applied);
        assert!(session.location_set().is_empty());
        assert!(!session.is_processing());
        assert_eq!(session.view().focus, ViewFocus::Fallback);
    }

    #[test]
    fn message_is_kept() {
        let mut session = Session::default();
        let token = session.begin_upload(image());
        session.apply_result(token, &result(json!({ "message": "No GPS data found" })));
        assert_eq!(session.message(), Some("No GPS data found"));

        session.begin_upload(image());
        assert_eq!(session.message(), None);
    }

    #[test]
    fn new_upload_clears_user_selection() {
        let mut session = Session::default();
        let token = session.begin_upload(image());
        session.apply_result(token, &demo_payload(false));
        session
            .select_location(&demo_candidates()[2].to_ref())
            .expect("known candidate");

        session.begin_upload(image());
        assert_eq!(session.selection(), &Selection::None);
    }

    #[test]
    fn new_result_resets_user_pick_even_if_candidate_reappears() {
        let mut session = Session::default();
        let token = session.begin_upload(image());
        session.apply_result(token, &demo_payload(false));
        session
            .select_location(&demo_candidates()[1].to_ref())
            .expect("known candidate");

        // Same candidates again for a re-uploaded image.
        let token = session.begin_upload(image());
        session.apply_result(token, &demo_payload(false));

        assert_eq!(
            session.selection(),
            &Selection::Auto(demo_candidates()[0].clone())
        );
    }

    #[test]
    fn pending_upload_blocks_set_changes_until_its_result() {
        let mut session = Session::default();
        let first = session.begin_upload(image());
        session.apply_result(first, &demo_payload(false));
        let second = session.begin_upload(image());

        assert_eq!(
            session.apply_result(first, &demo_payload(true)),
            ResultOutcome::Stale
        );
        assert!(session.location_set().is_empty());
        assert!(session.is_processing());

        session.apply_result(second, &demo_payload(true));
        assert_eq!(session.view().focus, ViewFocus::Exact);
    }

    #[test]
    fn first_frame_jumps_then_selection_flies() {
        let mut session = Session::default();
        let mut renderer = RecordingRenderer::default();
        let token = session.begin_upload(image());
        session.apply_result(token, &demo_payload(false));

        session.sync_map(&mut renderer);
        session
            .select_location(&demo_candidates()[1].to_ref())
            .expect("known candidate");
        session.sync_map(&mut renderer);

        assert_eq!(renderer.frames[0].transition, CameraTransition::Jump);
        assert!(matches!(
            renderer.frames[1].transition,
            CameraTransition::FlyTo { .. }
        ));
        assert_eq!(renderer.frames[1].view.focus, ViewFocus::Selected);
    }

    #[test]
    fn set_replacement_jumps() {
        let mut session = Session::default();
        let mut renderer = RecordingRenderer::default();
        session.sync_map(&mut renderer);

        let token = session.begin_upload(image());
        session.apply_result(token, &demo_payload(true));
        session.sync_map(&mut renderer);

        assert_eq!(renderer.frames[1].transition, CameraTransition::Jump);
        assert_eq!(renderer.frames[1].view.focus, ViewFocus::Exact);
    }

    #[test]
    fn tagging_needs_image_and_selection() {
        let mut session = Session::default();
        assert_eq!(session.tagging_request(), Err(TaggingError::NoImage));

        let token = session.begin_upload(image());
        assert_eq!(session.tagging_request(), Err(TaggingError::NoSelection));

        // Exact-only result: nothing selected, nothing to tag.
        session.apply_result(
            token,
            &result(json!({
                "exifData": { "coordinates": { "latitude": 48.8584, "longitude": 2.2945 } }
            })),
        );
        assert_eq!(session.tagging_request(), Err(TaggingError::NoSelection));
    }

    #[test]
    fn tagging_replaces_image_with_tagged_copy() {
        let mut session = Session::default();
        let token = session.begin_upload(image());
        session.apply_result(token, &demo_payload(false));

        let request = session.tagging_request().expect("auto selection");
        assert_eq!(request.coordinate, Coordinate::new(48.8584, 2.2945));

        let tagged = session
            .submit_tagging(&request, &mut AppendingWriter)
            .expect("writer succeeds");
        assert_eq!(tagged.file_name, "photo_geotagged.jpg");
        assert!(tagged.bytes.ends_with(b"GPS"));
    }

    #[test]
    fn stale_tagging_request_is_refused() {
        let mut session = Session::default();
        let token = session.begin_upload(image());
        session.apply_result(token, &demo_payload(false));

        let request = session.tagging_request().expect("auto selection");
        session
            .select_location(&demo_candidates()[2].to_ref())
            .expect("known candidate");

        let err = session
            .submit_tagging(&request, &mut AppendingWriter)
            .expect_err("selection changed");
        assert!(matches!(
            err,
            Error::Tagging(TaggingError::StaleRequest { .. })
        ));
        assert_eq!(session.image().map(|i| i.file_name.as_str()), Some("photo.jpg"));
    }

    #[test]
    fn writer_failure_keeps_original_image() {
        let mut session = Session::default();
        let token = session.begin_upload(image());
        session.apply_result(token, &demo_payload(false));
        let request = session.tagging_request().expect("auto selection");

        let err = session
            .submit_tagging(&request, &mut FailingWriter)
            .expect_err("writer fails");
        assert!(matches!(err, Error::Geotag(GeotagError::UnsupportedFormat)));
        assert_eq!(session.image(), Some(&image()));
    }

    #[test]
    fn dispatch_processes_in_order() {
        let mut session = Session::default();
        let started = session
            .dispatch(SessionEvent::UploadStarted(image()))
            .expect("always accepted");
        let EventOutcome::Started(token) = started else {
            panic!("expected a token");
        };

        let outcomes = session.dispatch_all([
            SessionEvent::ResultArrived {
                token,
                result: demo_payload(false),
            },
            SessionEvent::SelectLocation(demo_candidates()[1].to_ref()),
            SessionEvent::SelectLocation(CandidateRef::new(
                "Atlantis",
                Coordinate::new(0.0, 0.0),
            )),
            SessionEvent::UploadFailed(token),
        ]);

        assert!(matches!(
            outcomes[0],
            Ok(EventOutcome::Result(ResultOutcome::Applied))
        ));
        assert!(matches!(outcomes[1], Ok(EventOutcome::Selected)));
        assert!(matches!(outcomes[2], Err(Error::Selection(_))));
        assert!(matches!(
            outcomes[3],
            Ok(EventOutcome::Result(ResultOutcome::Stale))
        ));
        assert_eq!(
            session.selection().location(),
            Some(&demo_candidates()[1])
        );
    }

    #[test]
    fn dispatch_remove_image() {
        let mut session = Session::default();
        session.begin_upload(image());
        assert!(matches!(
            session.dispatch(SessionEvent::RemoveImage),
            Ok(EventOutcome::Removed)
        ));
        assert!(session.image().is_none());
        assert!(!session.is_processing());
    }
}
