//! Email Templates
//!
//! Each of the four notification variants is a [`TemplateRecord`]: an ordered
//! list of line specs. One renderer turns a record plus [`TemplateFields`]
//! into HTML or plain text, so the variants cannot drift apart in wording.

use crate::content::{
    self, html_escape, DETECTION_LEAD, END_TIME_LABEL, FURTHER_UPDATES, IMPACT_LABEL,
    INCIDENT_REPORT_FOLLOWUP, REGARDS, RESOLVED_NOTICE, ROOT_CAUSE_LABEL, START_TIME_LABEL,
};
use crate::{EmailPhase, TemplateKind};

const WRAPPER_OPEN: &str = r#"<div style="font-family: Calibri, Arial, sans-serif; font-size: 11pt;">"#;
const PARAGRAPH_OPEN: &str = r#"<p style="margin-bottom: 15px;">"#;
const GROUP_OPEN: &str = r#"<div style="margin-bottom: 15px;">"#;
const GROUP_LINE_OPEN: &str = r#"<p style="margin-bottom: 5px;">"#;

/// One line of a template record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSpec {
    /// "This is to inform you ... detected: {headline}." with the resolved
    /// notice optionally appended in the same paragraph
    Detection { resolved_inline: bool },
    /// Standalone bold resolved notice
    ResolvedNotice,
    /// "The issue started on {start} ..." (omitted without a start time)
    OngoingSince,
    /// Start/end time lines, each omitted when absent
    TimeWindow,
    Impact,
    RootCause,
    Boilerplate(&'static str),
    Regards,
}

/// Ordered line specs for one (kind, phase) cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateRecord {
    pub kind: TemplateKind,
    pub phase: EmailPhase,
    pub lines: &'static [LineSpec],
}

static TEMPLATES: [TemplateRecord; 4] = [
    TemplateRecord {
        kind: TemplateKind::Report,
        phase: EmailPhase::Opening,
        lines: &[
            LineSpec::Detection {
                resolved_inline: false,
            },
            LineSpec::Impact,
            LineSpec::RootCause,
            LineSpec::Boilerplate(FURTHER_UPDATES),
            LineSpec::Regards,
        ],
    },
    TemplateRecord {
        kind: TemplateKind::Report,
        phase: EmailPhase::Resolved,
        lines: &[
            LineSpec::Detection {
                resolved_inline: true,
            },
            LineSpec::Impact,
            LineSpec::RootCause,
            LineSpec::Boilerplate(INCIDENT_REPORT_FOLLOWUP),
            LineSpec::Regards,
        ],
    },
    TemplateRecord {
        kind: TemplateKind::System,
        phase: EmailPhase::Opening,
        lines: &[
            LineSpec::Detection {
                resolved_inline: false,
            },
            LineSpec::OngoingSince,
            LineSpec::Impact,
            LineSpec::RootCause,
            LineSpec::Boilerplate(FURTHER_UPDATES),
            LineSpec::Regards,
        ],
    },
    TemplateRecord {
        kind: TemplateKind::System,
        phase: EmailPhase::Resolved,
        lines: &[
            LineSpec::Detection {
                resolved_inline: false,
            },
            LineSpec::ResolvedNotice,
            LineSpec::TimeWindow,
            LineSpec::Impact,
            LineSpec::RootCause,
            LineSpec::Boilerplate(INCIDENT_REPORT_FOLLOWUP),
            LineSpec::Regards,
        ],
    },
];

/// What the notification is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Headline {
    ReportDelay {
        report_name: String,
        report_date: String,
    },
    /// Issue text without any percentage suffix
    Issue(String),
}

impl Headline {
    /// Subject line for this headline under the given ticket label
    pub fn subject(&self, ticket: &str) -> String {
        match self {
            Self::ReportDelay {
                report_name,
                report_date,
            } => content::report_subject(ticket, report_name, report_date),
            Self::Issue(issue) => content::system_subject(ticket, issue),
        }
    }

    fn segments(&self) -> Vec<Segment> {
        match self {
            Self::ReportDelay {
                report_name,
                report_date,
            } => vec![
                Segment::Text("The report ".to_string()),
                Segment::Bold(report_name.clone()),
                Segment::Text(" for ".to_string()),
                Segment::Bold(report_date.clone()),
                Segment::Text(" is being delayed".to_string()),
            ],
            Self::Issue(issue) => vec![Segment::Bold(issue.clone())],
        }
    }
}

/// Values interpolated into a template record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFields {
    pub headline: Headline,
    /// Impact line text, including the percentage suffix when one applies
    pub impact: String,
    pub root_cause: String,
    /// Already formatted start time
    pub start_time: Option<String>,
    /// Already formatted end time
    pub end_time: Option<String>,
}

impl TemplateFields {
    fn start_time(&self) -> Option<&str> {
        self.start_time.as_deref().filter(|t| !t.is_empty())
    }

    fn end_time(&self) -> Option<&str> {
        self.end_time.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Bold(String),
    Underline(String),
}

impl Segment {
    fn push_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&html_escape(text)),
            Self::Bold(text) => {
                out.push_str("<b>");
                out.push_str(&html_escape(text));
                out.push_str("</b>");
            }
            Self::Underline(text) => {
                out.push_str("<u>");
                out.push_str(&html_escape(text));
                out.push_str("</u>");
            }
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Bold(text) | Self::Underline(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Paragraph(Vec<Segment>),
    Group(Vec<Vec<Segment>>),
    Signature(&'static str),
}

fn labelled(label: &str, value: &str) -> Vec<Segment> {
    vec![
        Segment::Underline(label.to_string()),
        Segment::Text(format!(" {}.", value)),
    ]
}

impl TemplateRecord {
    /// The record for a (kind, phase) cell
    pub fn lookup(kind: TemplateKind, phase: EmailPhase) -> &'static TemplateRecord {
        match (kind, phase) {
            (TemplateKind::Report, EmailPhase::Opening) => &TEMPLATES[0],
            (TemplateKind::Report, EmailPhase::Resolved) => &TEMPLATES[1],
            (TemplateKind::System, EmailPhase::Opening) => &TEMPLATES[2],
            (TemplateKind::System, EmailPhase::Resolved) => &TEMPLATES[3],
        }
    }

    /// All four records
    pub fn all() -> &'static [TemplateRecord] {
        &TEMPLATES
    }

    fn blocks(&self, fields: &TemplateFields) -> Vec<Block> {
        let mut blocks = Vec::with_capacity(self.lines.len());

        for line in self.lines {
            match line {
                LineSpec::Detection { resolved_inline } => {
                    let mut segments = vec![Segment::Text(DETECTION_LEAD.to_string())];
                    segments.extend(fields.headline.segments());
                    segments.push(Segment::Text(".".to_string()));
                    if *resolved_inline {
                        segments.push(Segment::Text(" ".to_string()));
                        segments.push(Segment::Bold(RESOLVED_NOTICE.to_string()));
                    }
                    blocks.push(Block::Paragraph(segments));
                }
                LineSpec::ResolvedNotice => {
                    blocks.push(Block::Paragraph(vec![Segment::Bold(
                        RESOLVED_NOTICE.to_string(),
                    )]));
                }
                LineSpec::OngoingSince => {
                    if let Some(start) = fields.start_time() {
                        blocks.push(Block::Paragraph(vec![Segment::Text(format!(
                            "The issue started on {} and is currently ongoing.",
                            start
                        ))]));
                    }
                }
                LineSpec::TimeWindow => {
                    let mut lines = Vec::new();
                    if let Some(start) = fields.start_time() {
                        lines.push(labelled(START_TIME_LABEL, start));
                    }
                    if let Some(end) = fields.end_time() {
                        lines.push(labelled(END_TIME_LABEL, end));
                    }
                    if !lines.is_empty() {
                        blocks.push(Block::Group(lines));
                    }
                }
                LineSpec::Impact => {
                    blocks.push(Block::Paragraph(labelled(IMPACT_LABEL, &fields.impact)));
                }
                LineSpec::RootCause => {
                    blocks.push(Block::Paragraph(labelled(
                        ROOT_CAUSE_LABEL,
                        &fields.root_cause,
                    )));
                }
                LineSpec::Boilerplate(text) => {
                    blocks.push(Block::Paragraph(vec![Segment::Text(text.to_string())]));
                }
                LineSpec::Regards => blocks.push(Block::Signature(REGARDS)),
            }
        }

        blocks
    }

    /// Render the HTML body
    pub fn render_html(&self, fields: &TemplateFields) -> String {
        let mut html = String::from(WRAPPER_OPEN);
        html.push('\n');

        for block in self.blocks(fields) {
            match block {
                Block::Paragraph(segments) => {
                    html.push_str("    ");
                    html.push_str(PARAGRAPH_OPEN);
                    segments.iter().for_each(|s| s.push_html(&mut html));
                    html.push_str("</p>\n");
                }
                Block::Group(lines) => {
                    html.push_str("    ");
                    html.push_str(GROUP_OPEN);
                    html.push('\n');
                    for segments in lines {
                        html.push_str("        ");
                        html.push_str(GROUP_LINE_OPEN);
                        segments.iter().for_each(|s| s.push_html(&mut html));
                        html.push_str("</p>\n");
                    }
                    html.push_str("    </div>\n");
                }
                Block::Signature(text) => {
                    html.push_str("    <p>");
                    html.push_str(&html_escape(text));
                    html.push_str("</p>\n");
                }
            }
        }

        html.push_str("</div>");
        html
    }

    /// Render the plain-text alternative body
    pub fn render_text(&self, fields: &TemplateFields) -> String {
        let paragraphs: Vec<String> = self
            .blocks(fields)
            .into_iter()
            .map(|block| match block {
                Block::Paragraph(segments) => segments.iter().map(Segment::text).collect::<String>(),
                Block::Group(lines) => lines
                    .iter()
                    .map(|segments| segments.iter().map(Segment::text).collect::<String>())
                    .collect::<Vec<_>>()
                    .join("\n"),
                Block::Signature(text) => text.to_string(),
            })
            .collect();

        paragraphs.join("\n\n")
    }
}
