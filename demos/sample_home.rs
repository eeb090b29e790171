// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sample home walkthrough.
//!
//! Loads the three sample devices, watches every update and drives each
//! device through a few actions, printing what an observer would render.
//!
//! # Usage
//!
//! ```bash
//! # Default dimmer level of 55%
//! cargo run --example sample_home
//!
//! # Custom dimmer level
//! cargo run --example sample_home -- 80
//! ```

use std::env;
use std::time::Duration;

use devctl::sample::{BUTTON_ID, DIMMABLE_ID, TOGGLE_ID};
use devctl::{Action, ControlHub, Device, DeviceFilter, DeviceId, Subscription};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let level: f32 = match env::args().nth(1) {
        Some(raw) => raw.parse()?,
        None => 55.0,
    };

    let hub = ControlHub::sample_home();
    let mut updates = hub.subscribe(DeviceFilter::All);

    println!("=== Current state ===");
    drain(&mut updates, hub.device_count()).await;

    let button = DeviceId::new(BUTTON_ID)?;
    let bulb = DeviceId::new(TOGGLE_ID)?;
    let dimmer = DeviceId::new(DIMMABLE_ID)?;

    println!("\n=== Actions ===");
    let actions = [
        (&button, Action::Trigger),
        (&bulb, Action::turn_on()),
        (&dimmer, Action::SetLevel { value: level }),
        (&dimmer, Action::turn_on()),
    ];
    let mut applied = 0;
    for (id, action) in actions {
        let response = hub.perform(id, action);
        println!("{id} <- {action}: {response}");
        if response.is_ok() {
            applied += 1;
        }
    }

    // Refused actions leave the device alone and publish nothing
    println!("{bulb} <- Trigger: {}", hub.perform(&bulb, Action::Trigger));
    let garage = DeviceId::new("garage-door")?;
    println!("{garage} <- Trigger: {}", hub.perform(&garage, Action::Trigger));

    println!("\n=== Updates ===");
    drain(&mut updates, applied).await;

    updates.unsubscribe();
    Ok(())
}

/// Prints `count` snapshots, giving up after a short wait.
async fn drain(updates: &mut Subscription, count: usize) {
    for _ in 0..count {
        match tokio::time::timeout(Duration::from_secs(1), updates.recv()).await {
            Ok(Some(device)) => print_device(&device),
            Ok(None) => break,
            Err(_) => {
                eprintln!("No update received");
                break;
            }
        }
    }
}

fn print_device(device: &Device) {
    println!(
        "{:<14} {:<18} {:<10} rev {}",
        device.id().as_str(),
        device.info().display_name(),
        device.state().to_string(),
        device.revision()
    );
}
