// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Shared test doubles.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use davsync::{
    Collection, DavError, Request, Response, Sandbox, SyncOptions, SyncResult, SyncStrategy,
    Transport,
};

/// One request seen by [`RecordingTransport`].
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub request: Request,
    pub url: String,
    pub sandbox: Option<Sandbox>,
}

/// Transport that records every request and replays canned results.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentRequest>>,
    replies: Mutex<VecDeque<Result<Response, DavError>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replying(reply: Result<Response, DavError>) -> Arc<Self> {
        let transport = Self::default();
        transport.push(reply);
        Arc::new(transport)
    }

    pub fn push(&self, reply: Result<Response, DavError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn options(self: &Arc<Self>) -> SyncOptions {
        SyncOptions::new(self.clone())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(
        &self,
        request: &Request,
        url: &str,
        sandbox: Option<&Sandbox>,
    ) -> Result<Response, DavError> {
        self.sent.lock().unwrap().push(SentRequest {
            request: request.clone(),
            url: url.to_string(),
            sandbox: sandbox.cloned(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Response::Mutated { etag: None }))
    }
}

/// Strategy that counts its calls and returns a fixed result.
#[derive(Debug, Default)]
pub struct CountingStrategy {
    calls: Mutex<Vec<Collection>>,
    result: SyncResult,
}

impl CountingStrategy {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn returning(result: SyncResult) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            result,
        })
    }

    pub fn calls(&self) -> Vec<Collection> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SyncStrategy for CountingStrategy {
    async fn sync(
        &self,
        collection: &Collection,
        _options: &SyncOptions,
    ) -> Result<SyncResult, DavError> {
        self.calls.lock().unwrap().push(collection.clone());
        Ok(self.result.clone())
    }
}
