//! Deterministic LaTeX assembly for generated documents.
//!
//! Everything here is template-driven and pure: the same content always
//! produces byte-identical source. The model never writes LaTeX — all user
//! text passes through `escape_latex` so the compiler accepts arbitrary
//! captured content. Documents are self-contained (standard classes and
//! packages only), so they compile on any TeX Live install.

use crate::synthesis::content::{CoverLetter, SectionItem, TailoredResume};

/// Escapes LaTeX special characters so arbitrary text survives typesetting.
pub fn escape_latex(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '&' => out.push_str("\\&"),
            '%' => out.push_str("\\%"),
            '$' => out.push_str("\\$"),
            '#' => out.push_str("\\#"),
            '_' => out.push_str("\\_"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

const RESUME_PREAMBLE: &str = r"\documentclass[11pt]{article}
\usepackage[margin=0.75in]{geometry}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}
\usepackage{titlesec}
\titleformat{\section}{\large\bfseries}{}{0pt}{\MakeUppercase}[\titlerule]
\titlespacing{\section}{0pt}{10pt}{6pt}
\setlength{\parindent}{0pt}
\pagestyle{empty}
\begin{document}
";

const LETTER_PREAMBLE: &str = r"\documentclass[11pt]{article}
\usepackage[margin=1in]{geometry}
\usepackage[hidelinks]{hyperref}
\setlength{\parindent}{0pt}
\setlength{\parskip}{0.8em}
\pagestyle{empty}
\begin{document}
";

const DOCUMENT_END: &str = "\\end{document}\n";

/// Renders tailored résumé content into a complete LaTeX document.
pub fn resume_to_latex(content: &TailoredResume) -> String {
    let mut doc = String::with_capacity(4096);
    doc.push_str(RESUME_PREAMBLE);

    doc.push_str("\\begin{center}\n");
    doc.push_str(&format!(
        "{{\\LARGE \\textbf{{{}}}}}\\\\[2pt]\n",
        escape_latex(&content.full_name)
    ));
    if let Some(headline) = &content.headline {
        doc.push_str(&format!("{{\\large {}}}\\\\[2pt]\n", escape_latex(headline)));
    }
    doc.push_str(&format!("{}\n", escape_latex(&content.contact_line)));
    doc.push_str("\\end{center}\n\n");

    if let Some(summary) = &content.summary {
        doc.push_str(&format!("{}\n\n", escape_latex(summary)));
    }

    for section in &content.sections {
        doc.push_str(&format!("\\section*{{{}}}\n", escape_latex(&section.heading)));
        for item in &section.items {
            push_item(&mut doc, item);
        }
        doc.push('\n');
    }

    doc.push_str(DOCUMENT_END);
    doc
}

fn push_item(doc: &mut String, item: &SectionItem) {
    doc.push_str(&format!("\\textbf{{{}}}", escape_latex(&item.title)));
    if let Some(range) = &item.date_range {
        doc.push_str(&format!(" \\hfill {}", escape_latex(range)));
    }
    doc.push_str("\\\\\n");
    if let Some(subtitle) = &item.subtitle {
        doc.push_str(&format!("\\textit{{{}}}\\\\\n", escape_latex(subtitle)));
    }

    let bullets: Vec<&String> = item
        .bullets
        .iter()
        .filter(|b| !b.trim().is_empty())
        .collect();
    if !bullets.is_empty() {
        doc.push_str("\\begin{itemize}[leftmargin=*,itemsep=1pt,topsep=2pt]\n");
        for bullet in bullets {
            doc.push_str(&format!("  \\item {}\n", escape_latex(bullet)));
        }
        doc.push_str("\\end{itemize}\n");
    }
}

/// Renders cover letter content into a complete LaTeX document.
pub fn cover_letter_to_latex(letter: &CoverLetter) -> String {
    let mut doc = String::with_capacity(2048);
    doc.push_str(LETTER_PREAMBLE);

    if let Some(date_line) = &letter.date_line {
        doc.push_str(&format!("\\hfill {}\n\n", escape_latex(date_line)));
    }
    if let Some(recipient) = &letter.recipient_line {
        doc.push_str(&format!("{}\n\n", escape_latex(recipient)));
    }

    doc.push_str(&format!("{}\n\n", escape_latex(&letter.greeting)));

    for paragraph in &letter.paragraphs {
        doc.push_str(&format!("{}\n\n", escape_latex(paragraph)));
    }

    doc.push_str(&format!("{}\\\\[2em]\n", escape_latex(&letter.closing)));
    doc.push_str(&format!("{}\n\n", escape_latex(&letter.signature)));

    doc.push_str(DOCUMENT_END);
    doc
}
