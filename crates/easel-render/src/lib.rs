// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! # Easel Render
//!
//! Frame-coalescing batch renderer. Callers queue keyed units of work with
//! [`BatchRenderer::queue_update`]; the renderer runs them once per frame,
//! latest write per key, then notifies after-flush observers.

#![warn(missing_docs)]

pub mod config;
pub mod queue;
pub mod renderer;

pub use config::{RendererConfig, DEFAULT_FLUSH_METRIC, DEFAULT_FRAME_BUDGET_MS};
pub use queue::{UpdateFn, UpdateQueue};
pub use renderer::{BatchRenderer, ObserverHandle};
