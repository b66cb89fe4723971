// All LLM prompt constants. Each generation prompt pins the exact JSON shape
// the fixed schemas in `synthesis::content` will accept — the model never
// emits LaTeX; rendering is owned by the core.

/// System prompt for résumé parsing — enforces JSON-only output.
pub const RESUME_PARSE_SYSTEM: &str =
    "You are an expert resume parser. \
    Extract ALL information from a resume into structured JSON. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT summarize or omit details.";

/// Résumé parsing prompt template. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"Extract the following resume text into structured JSON.

Return a JSON object with this EXACT schema (omit optional fields you cannot find):
{
  "contact_info": {
    "full_name": "Jane Doe",
    "email": "jane@example.com",
    "phone": "+1 555 0100",
    "location": "Minneapolis, MN",
    "linkedin": "linkedin.com/in/janedoe",
    "github": "github.com/janedoe",
    "website": "janedoe.dev"
  },
  "summary": "One-paragraph professional summary if present",
  "experience": [
    {
      "company": "Acme Corp",
      "position": "Senior Engineer",
      "location": "Remote",
      "start_date": "2021-03",
      "end_date": null,
      "current": true,
      "highlights": ["Led migration of billing pipeline to Rust"],
      "technologies": ["Rust", "PostgreSQL"]
    }
  ],
  "education": [
    {
      "institution": "University of Minnesota",
      "degree": "BSc",
      "field_of_study": "Computer Science",
      "start_date": "2013",
      "end_date": "2017",
      "gpa": "3.8",
      "honors": ["cum laude"]
    }
  ],
  "projects": [
    {"name": "ferrisviz", "description": "Terminal plotting library", "technologies": ["Rust"], "link": "github.com/janedoe/ferrisviz"}
  ],
  "skills": [
    {"category": "Languages", "items": ["Rust", "Python"]}
  ],
  "certifications": [
    {"name": "CKA", "issuer": "CNCF", "issue_date": "2022"}
  ]
}

Rules:
1. Preserve ALL information — every date, location, bullet point, and link.
2. Keep experiences and education in the order they appear.
3. Group skills by category where the resume does; otherwise use a single "Skills" category.
4. Dates stay as free-form strings exactly as written.

RESUME TEXT:
{resume_text}"#;

/// System prompt for tailored résumé content — enforces JSON-only output.
pub const TAILOR_RESUME_SYSTEM: &str =
    "You are an expert resume optimizer tailoring a resume to a specific job posting. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Keep ALL factual information accurate — do NOT fabricate experience.";

/// Tailored résumé prompt template.
/// Replace: {resume_json}, {job_url}, {job_text}
pub const TAILOR_RESUME_PROMPT_TEMPLATE: &str = r#"Tailor the candidate's resume to the job posting below.

Return a JSON object with this EXACT schema:
{
  "full_name": "Jane Doe",
  "contact_line": "jane@example.com | +1 555 0100 | Minneapolis, MN | github.com/janedoe",
  "headline": "Senior Backend Engineer",
  "summary": "2-3 sentence summary tailored to the posting",
  "sections": [
    {
      "heading": "Experience",
      "items": [
        {
          "title": "Senior Engineer",
          "subtitle": "Acme Corp, Remote",
          "date_range": "Mar 2021 - Present",
          "bullets": [
            "Led migration of billing pipeline to Rust, cutting p99 latency 40%"
          ]
        }
      ]
    },
    {
      "heading": "Skills",
      "items": [
        {"title": "Languages", "subtitle": null, "date_range": null, "bullets": ["Rust, Python, SQL"]}
      ]
    }
  ]
}

HARD RULES:
1. Use ONLY facts present in the candidate's resume — no invention, no interpolation.
2. Reorder and rephrase to emphasize what the posting asks for; use action verbs.
3. Every section needs at least one item; every item at least one non-empty bullet.
4. Include Experience, Education, and Skills sections; add Projects or Certifications only if relevant.
5. Plain text only in all fields — no LaTeX, no markdown.

CANDIDATE'S RESUME:
{resume_json}

JOB POSTING URL: {job_url}

JOB POSTING TEXT:
{job_text}"#;

/// System prompt for cover letter content — enforces JSON-only output.
pub const COVER_LETTER_SYSTEM: &str =
    "You are a professional cover letter writer crafting compelling, personalized letters. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT use placeholder text like [Your Name] — use the candidate's actual details.";

/// Cover letter prompt template.
/// Replace: {resume_json}, {job_url}, {job_text}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a cover letter connecting the candidate's experience to the job posting below.

Return a JSON object with this EXACT schema:
{
  "recipient_line": "Hiring Team, Acme Corp",
  "date_line": "March 3, 2026",
  "greeting": "Dear Hiring Team,",
  "paragraphs": [
    "Opening paragraph naming the role and why the candidate fits.",
    "Body paragraph with the most relevant experience.",
    "Closing paragraph with a call to action."
  ],
  "closing": "Sincerely,",
  "signature": "Jane Doe"
}

HARD RULES:
1. At most 4 body paragraphs — concise and specific beats long and generic.
2. Professional yet personable tone; address requirements the posting actually states.
3. Use ONLY facts from the candidate's resume.
4. Plain text only in all fields — no LaTeX, no markdown.

CANDIDATE'S RESUME:
{resume_json}

JOB POSTING URL: {job_url}

JOB POSTING TEXT:
{job_text}"#;
