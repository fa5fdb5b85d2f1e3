use crate::{
    client::QueryService,
    error::QueryError,
    model::{Query, QueryResult},
    render::{DisplayState, render},
};

/// State behind one query box and its result area.
///
/// Only one query may be in flight; the previous result is discarded when
/// a new query starts.
#[derive(Debug, Default)]
pub struct QuerySession {
    is_loading: bool,
    result: Option<QueryResult>,
    input_error: Option<QueryError>,
}

impl QuerySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn result(&self) -> Option<&QueryResult> {
        self.result.as_ref()
    }

    /// Inline validation message for the last submission, if any.
    pub fn input_error(&self) -> Option<&QueryError> {
        self.input_error.as_ref()
    }

    /// The user is typing again: drop the inline validation message.
    pub fn edit(&mut self) {
        self.input_error = None;
    }

    /// Validate `input` and enter the loading state.
    ///
    /// On a validation error nothing else changes: no request should be
    /// sent and the previous result stays as it was.
    pub fn begin(&mut self, input: &str) -> Result<Query, QueryError> {
        if self.is_loading {
            return Err(QueryError::Busy);
        }

        let query = Query::new(input).inspect_err(|err| {
            self.input_error = Some(err.clone());
        })?;

        self.input_error = None;
        self.result = None;
        self.is_loading = true;

        Ok(query)
    }

    /// Store the outcome of the request started by [`QuerySession::begin`].
    pub fn finish(&mut self, result: QueryResult) {
        self.result = Some(result);
        self.is_loading = false;
    }

    /// Validate, send through `service`, and store the outcome.
    pub async fn submit(
        &mut self,
        input: &str,
        service: &dyn QueryService,
    ) -> Result<(), QueryError> {
        let query = self.begin(input)?;
        let result = service.submit(&query).await;
        self.finish(result);
        Ok(())
    }

    pub fn display(&self) -> DisplayState {
        render(self.result.as_ref(), self.is_loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct StubService {
        calls: AtomicUsize,
        reply: QueryResult,
    }

    impl StubService {
        fn replying(reply: QueryResult) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QueryService for StubService {
        async fn submit(&self, _query: &Query) -> QueryResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    #[tokio::test]
    async fn whitespace_input_never_reaches_service() {
        let service = StubService::replying(QueryResult::success("unused"));
        let mut session = QuerySession::new();

        let err = session.submit("   \t", &service).await.unwrap_err();

        assert_eq!(err, QueryError::Empty);
        assert_eq!(service.calls(), 0);
        assert_eq!(session.input_error(), Some(&QueryError::Empty));
        assert!(session.result().is_none());
        assert_eq!(session.display(), DisplayState::Idle);
    }

    #[tokio::test]
    async fn successful_submission_stores_result() {
        let service = StubService::replying(QueryResult::success("Temperature: 12°C"));
        let mut session = QuerySession::new();

        session.submit("weather in Oslo", &service).await.unwrap();

        assert_eq!(service.calls(), 1);
        assert!(!session.is_loading());
        assert!(matches!(session.display(), DisplayState::Structured(_)));
    }

    #[tokio::test]
    async fn failure_replaces_previous_success() {
        let mut session = QuerySession::new();

        let ok = StubService::replying(QueryResult::success("Temperature: 12°C"));
        session.submit("weather in Oslo", &ok).await.unwrap();

        let down = StubService::replying(QueryResult::failure("Server is unreachable."));
        session.submit("weather in Oslo", &down).await.unwrap();

        assert_eq!(
            session.display(),
            DisplayState::Error {
                message: "Server is unreachable.".into()
            }
        );
    }

    #[test]
    fn begin_enters_loading_and_clears_result() {
        let mut session = QuerySession::new();
        session.finish(QueryResult::success("old"));

        let query = session.begin(" weather ").unwrap();

        assert_eq!(query.as_str(), "weather");
        assert!(session.is_loading());
        assert!(session.result().is_none());
        assert_eq!(session.display(), DisplayState::Loading);
    }

    #[test]
    fn second_begin_while_loading_is_refused() {
        let mut session = QuerySession::new();
        session.begin("weather in Pune").unwrap();

        assert_eq!(session.begin("weather in Oslo").unwrap_err(), QueryError::Busy);
    }

    #[test]
    fn empty_input_keeps_previous_result() {
        let mut session = QuerySession::new();
        session.finish(QueryResult::success("Sunny"));

        session.begin("").unwrap_err();

        assert_eq!(session.result(), Some(&QueryResult::success("Sunny")));
    }

    #[test]
    fn edit_clears_input_error() {
        let mut session = QuerySession::new();
        session.begin(" ").unwrap_err();
        assert!(session.input_error().is_some());

        session.edit();
        assert!(session.input_error().is_none());
    }
}
