#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use oxide_router::{
    loader_fn, BoxFuture, Loader, LoaderArgs, MiddlewareContext, MiddlewareHandler,
    MiddlewareResult, PathParams, Request, Response, Result,
};

/// Shared record of which handlers (and loaders) ran, in order.
#[derive(Clone, Default)]
pub struct Trace(Arc<Mutex<Vec<String>>>);

impl Trace {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// A middleware that records its name and returns a fixed result.
pub struct Recording {
    pub name: &'static str,
    pub result: MiddlewareResult,
    pub trace: Trace,
}

impl Recording {
    pub fn new(name: &'static str, result: MiddlewareResult, trace: &Trace) -> Self {
        Self {
            name,
            result,
            trace: trace.clone(),
        }
    }
}

impl MiddlewareHandler for Recording {
    fn handle<'a>(
        &'a self,
        _req: &'a Request,
        _ctx: &'a MiddlewareContext,
    ) -> BoxFuture<'a, Result<MiddlewareResult>> {
        Box::pin(async move {
            self.trace.push(self.name);
            Ok(self.result.clone())
        })
    }
}

/// A loader that records the path it was called with and echoes it.
pub fn recording_loader(trace: &Trace) -> Loader {
    let trace = trace.clone();
    loader_fn(move |args: LoaderArgs| {
        let trace = trace.clone();
        async move {
            let path = args.request.path().to_string();
            trace.push(format!("loader {path}"));
            Ok(Response::text(path))
        }
    })
}

pub fn args(target: &str) -> LoaderArgs {
    LoaderArgs::new(Request::get(target).unwrap(), PathParams::new())
}
