/*
This file is part of the Raster Block Vectorizer
Copyright (C) 2026 Novel-T

The Raster Block Vectorizer is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

pub fn format_duration(d: Duration) -> String {
    let mut secs = d.as_secs();
    let hours = secs / 3600;
    secs %= 3600;
    let minutes = secs / 60;
    secs %= 60;

    let ms = d.as_millis() % 1000;

    format!("{}h {}m {}s {}ms", hours, minutes, secs, ms)
}

pub fn get_temp_filename(file_name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("raster_vec");
    path.push(Uuid::new_v4().to_string());
    path.push(file_name);
    path
}

/// CSV quoting for fields that may contain commas (WKT geometry)
pub fn quote_csv_string(s: &str) -> String {
    let mut r = String::with_capacity(s.len() + 2);

    r.push('"');

    for c in s.chars() {
        if c == '"' {
            r.push('"');
        }
        r.push(c);
    }

    r.push('"');

    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        let d = Duration::from_millis(3_661_005);
        assert_eq!(format_duration(d), "1h 1m 1s 5ms");
    }

    #[test]
    fn test_quote_csv_string() {
        assert_eq!(quote_csv_string("POLYGON((0 0,1 1))"), "\"POLYGON((0 0,1 1))\"");
        assert_eq!(quote_csv_string("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_temp_filenames_unique() {
        assert_ne!(get_temp_filename("a.tif"), get_temp_filename("a.tif"));
    }
}
