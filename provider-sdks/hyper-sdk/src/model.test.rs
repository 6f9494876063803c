use std::sync::Arc;

use futures::stream;

use super::*;
use crate::messages::ContentBlock;
use crate::messages::Message;
use crate::response::FinishReason;
use crate::stream::StreamEvent;

struct EchoModel {
    id: String,
}

#[async_trait]
impl Model for EchoModel {
    fn model_id(&self) -> &str {
        &self.id
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, HyperError> {
        let text = request
            .messages
            .last()
            .map(|m| m.text())
            .unwrap_or_default();
        Ok(GenerateResponse::new("resp_1", &self.id).with_content(vec![ContentBlock::text(text)]))
    }

    async fn stream(&self, _request: GenerateRequest) -> Result<StreamResponse, HyperError> {
        let events = vec![
            Ok(StreamEvent::response_created("resp_1")),
            Ok(StreamEvent::text_delta(0, "hi")),
            Ok(StreamEvent::response_done("resp_1", FinishReason::Stop)),
        ];
        Ok(StreamResponse::new(Box::pin(stream::iter(events))))
    }
}

#[tokio::test]
async fn generate_returns_echoed_text() {
    let model = EchoModel {
        id: "echo-1".to_string(),
    };
    let request = GenerateRequest::new(vec![Message::user("hello")]);

    let response = model.generate(request).await.unwrap();

    assert_eq!(response.text(), "hello");
}

#[tokio::test]
async fn stream_yields_events_through_a_dyn_model() {
    let model: Arc<dyn Model> = Arc::new(EchoModel {
        id: "echo-1".to_string(),
    });
    assert_eq!(model.model_id(), "echo-1");

    let request = GenerateRequest::new(vec![Message::user("hello")]);
    let response = model.stream(request).await.unwrap().get_final_text().await.unwrap();

    assert_eq!(response, "hi");
}
