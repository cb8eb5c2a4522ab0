// Copyright 2025 the Vizjar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt::Write as _;

use vizjar_charts::escape_xml;

/// One demo: a heading, a short description and the rendered plot.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub title: &'static str,
    pub description: &'static str,
    pub svg: String,
}

/// Renders every section into a single self-contained HTML page.
pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_xml(title));
    out.push_str(
        "<style>body{font-family:sans-serif;margin:2em;}section{margin-bottom:2em;}\
         svg{border:1px solid #ddd;overflow:visible;}</style>\n",
    );
    out.push_str("</head>\n<body>\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape_xml(title));
    for section in sections {
        out.push_str("<section>\n");
        let _ = writeln!(out, "<h2>{}</h2>", escape_xml(section.title));
        let _ = writeln!(out, "<p>{}</p>", escape_xml(section.description));
        out.push_str(&section.svg);
        out.push_str("\n</section>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}
