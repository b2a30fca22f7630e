// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `transbench workload` command - Show the fixed workload.

use transbench_core::Workload;

pub fn execute(raw: bool) -> Result<(), Box<dyn std::error::Error>> {
    let workload = Workload::fixed();

    if raw {
        print!("{}", workload.as_str());
        return Ok(());
    }

    println!("Workload:  {}", workload.name());
    println!("Filename:  {}", workload.filename());
    println!("Size:      {} bytes", workload.len());
    println!("Lines:     {}", workload.as_str().lines().count());
    println!("CRC32:     {:#010x}", workload.checksum());

    Ok(())
}
