//! Scripted [`LanguageModel`] for generator tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::error::Error;

use crate::api::{ChatRequest, ImageRequest, LanguageModel};

/// Replays canned replies in order and records every request it sees.
///
/// An `Err` entry is returned as a request failure. Running out of replies is
/// also a failure.
#[derive(Default)]
pub struct ScriptedModel {
    chat: RefCell<VecDeque<Result<String, String>>>,
    images: RefCell<VecDeque<Result<String, String>>>,
    pub chat_requests: RefCell<Vec<ChatRequest>>,
    pub image_requests: RefCell<Vec<ImageRequest>>,
}

impl ScriptedModel {
    pub fn chat(self, reply: Result<&str, &str>) -> Self {
        self.chat
            .borrow_mut()
            .push_back(reply.map(str::to_string).map_err(str::to_string));
        self
    }

    pub fn image(self, reply: Result<&str, &str>) -> Self {
        self.images
            .borrow_mut()
            .push_back(reply.map(str::to_string).map_err(str::to_string));
        self
    }
}

fn next(queue: &RefCell<VecDeque<Result<String, String>>>) -> Result<String, Box<dyn Error>> {
    match queue.borrow_mut().pop_front() {
        Some(Ok(reply)) => Ok(reply),
        Some(Err(e)) => Err(e.into()),
        None => Err("script exhausted".into()),
    }
}

impl LanguageModel for ScriptedModel {
    async fn complete(&self, request: &ChatRequest) -> Result<String, Box<dyn Error>> {
        self.chat_requests.borrow_mut().push(request.clone());
        next(&self.chat)
    }

    async fn generate_image(&self, request: &ImageRequest) -> Result<String, Box<dyn Error>> {
        self.image_requests.borrow_mut().push(request.clone());
        next(&self.images)
    }

    fn chat_model(&self) -> &str {
        "scripted-chat"
    }

    fn image_model(&self) -> &str {
        "scripted-image"
    }
}
