// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use arbiter::{console, log};
use tracing::Level;

fn main() -> anyhow::Result<()> {
    log::init(Level::WARN)?;
    console::run()?;
    Ok(())
}
