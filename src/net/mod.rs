// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! HTTP communication with the processing backend.

pub mod fetch;
pub mod submit;
