//! Static text used by the decorative effects.

use rand::seq::SliceRandom;
use rand::Rng;

/// Default rotating titles for the typing headline.
pub const TITLES: &[&str] = &[
    "Software Architect",
    "Senior Software Engineer",
    "Java & Spring Boot Expert",
    "Cloud & Microservices Specialist",
    "Team Leader & Mentor",
];

pub const STATS: &[(&str, f64)] = &[
    ("Java Expertise", 95.0),
    ("Spring Boot", 92.0),
    ("AWS Cloud", 88.0),
    ("Microservices", 90.0),
    ("System Design", 94.0),
    ("Team Leadership", 85.0),
];

pub const MATRIX_GLYPHS: &str = "01ﾊﾐﾋｰｳｼﾅﾓﾆｻﾜﾂｵﾘｱﾎﾃﾏｹﾒｴｶｷﾑﾕﾗｾﾈｽﾀﾇﾍ";
pub const MATRIX_COLUMN_LEN: usize = 20;
pub const BINARY_STRING_BITS: usize = 50;

pub const CODE_SNIPPETS: &[&str] = &[
    "function() {", "=> {", "class", "const", "let", "var", "return", "import", "export",
    "async", "await", "{}", "[]", "()", "=>", "&&", "||", "===", "!==", "null", "undefined",
];

pub const PARTICLE_KINDS: &[&str] = &["", "code", "success"];

/// `(label, css category)` pairs for the floating tech tags.
pub const TECH_TAGS: &[(&str, &str)] = &[
    ("Java 17+", "java"),
    ("Spring Boot", "spring"),
    ("Kotlin", "java"),
    ("TypeScript", "frontend"),
    ("Python", "ai"),
    ("Go", "devops"),
    ("Rust", "java"),
    ("AWS Lambda", "cloud"),
    ("Kubernetes", "devops"),
    ("Docker", "devops"),
    ("Terraform", "devops"),
    ("Microservices", "cloud"),
    ("Serverless", "cloud"),
    ("GraphQL", "frontend"),
    ("OpenAI", "ai"),
    ("Machine Learning", "ai"),
    ("TensorFlow", "ai"),
    ("LLM Integration", "ai"),
    ("React 18", "frontend"),
    ("Next.js", "frontend"),
    ("Vue 3", "frontend"),
    ("Svelte", "frontend"),
    ("Tailwind CSS", "frontend"),
    ("PostgreSQL", "database"),
    ("MongoDB", "database"),
    ("Redis", "database"),
    ("Elasticsearch", "database"),
    ("Apache Kafka", "database"),
    ("GitHub Actions", "devops"),
    ("Prometheus", "devops"),
    ("Grafana", "devops"),
    ("Istio", "devops"),
    ("Azure", "cloud"),
    ("GCP", "cloud"),
    ("Cloudflare", "cloud"),
    ("Spring WebFlux", "spring"),
    ("Quarkus", "java"),
    ("FastAPI", "ai"),
    ("gRPC", "java"),
];

/// Architecture layers: `(title, badges)`.
pub const ARCHITECTURE: &[(&str, &[&str])] = &[
    ("Presentation Layer", &["React", "Angular", "Vue.js"]),
    ("API Gateway", &["Spring Gateway", "Load Balancer"]),
    ("Microservices", &["Spring Boot", "Docker", "Kubernetes"]),
    ("Data Layer", &["PostgreSQL", "Redis", "MongoDB"]),
];

/// Network overlay nodes as `(top %, left %)`.
pub const NETWORK_NODES: &[(u8, u8)] = &[(20, 20), (20, 80), (60, 50), (80, 20), (80, 80)];

/// Network overlay links as `(top %, left %, width %, rotation deg)`.
pub const NETWORK_LINKS: &[(u8, u8, u8, i16)] = &[(20, 20, 60, 0), (40, 50, 30, 45), (60, 20, 60, 30)];

pub const EDITOR_TABS: &[&str] = &["Application.java", "Controller.java", "Service.java"];

/// Pre-highlighted editor lines (already escaped HTML).
pub const EDITOR_LINES: &[&str] = &[
    r#"<span class="code-keyword">package</span> <span class="code-string">com.portfolio</span>;"#,
    "",
    r#"<span class="code-keyword">@SpringBootApplication</span>"#,
    r#"<span class="code-keyword">public class</span> <span class="code-function">ArchitectApplication</span> {"#,
    r#"<span class="code-comment">    // Architecting scalable solutions</span>"#,
    r#"<span class="code-keyword">    public static void</span> <span class="code-function">main</span>(<span class="code-variable">String[] args</span>) {"#,
    r#"<span class="code-function">        SpringApplication.run</span>(<span class="code-variable">Application.class</span>, <span class="code-variable">args</span>);"#,
    "    }",
    "}",
];

/// Keyframes and helper classes the effects rely on.
pub const INJECTED_CSS: &str = r#"
@keyframes pulse {
    0% { transform: scale(1); }
    50% { transform: scale(1.1); }
    100% { transform: scale(1); }
}
@keyframes slideInUp {
    from { opacity: 0; transform: translateY(30px); }
    to { opacity: 1; transform: translateY(0); }
}
@keyframes fadeInUp {
    from { opacity: 0; transform: translateY(20px); }
    to { opacity: 1; transform: translateY(0); }
}
@keyframes codeFloat {
    0% { transform: translateY(100vh) rotate(0deg); opacity: 0; }
    10% { opacity: 1; }
    90% { opacity: 1; }
    100% { transform: translateY(-100vh) rotate(360deg); opacity: 0; }
}
@keyframes particleFloat {
    0% { transform: translateY(100vh) rotate(0deg); opacity: 0; }
    10% { opacity: 1; }
    90% { opacity: 1; }
    100% { transform: translateY(-100vh) rotate(360deg); opacity: 0; }
}
.animate-in { animation: fadeInUp 0.6s ease forwards; }
.navbar { transition: transform 0.3s ease, background-color 0.3s ease; }
.navbar.scrolled {
    background-color: rgba(255, 255, 255, 0.95) !important;
    backdrop-filter: blur(10px);
    box-shadow: 0 2px 20px rgba(0, 0, 0, 0.1);
}
.particle {
    position: absolute;
    width: 4px;
    height: 4px;
    background: var(--primary-color);
    border-radius: 50%;
    animation: particleFloat 10s linear infinite;
}
.particle.code { background: var(--code-color); }
.particle.success { background: var(--accent-color); }
.code-element { animation: codeFloat 15s infinite linear; }
.sr-only {
    position: absolute;
    width: 1px;
    height: 1px;
    overflow: hidden;
    clip: rect(0, 0, 0, 0);
    white-space: nowrap;
}
"#;

/// One glyph per line, falling-column style.
pub fn matrix_column_text<R: Rng + ?Sized>(rng: &mut R) -> String {
    let glyphs: Vec<char> = MATRIX_GLYPHS.chars().collect();
    let mut text = String::with_capacity(MATRIX_COLUMN_LEN * 4);
    for _ in 0..MATRIX_COLUMN_LEN {
        if let Some(c) = glyphs.choose(rng) {
            text.push(*c);
        }
        text.push('\n');
    }
    text
}

/// Random bits grouped into bytes.
pub fn binary_string<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut text = String::with_capacity(BINARY_STRING_BITS + BINARY_STRING_BITS / 8);
    for i in 0..BINARY_STRING_BITS {
        text.push(if rng.gen_bool(0.5) { '1' } else { '0' });
        if i % 8 == 7 {
            text.push(' ');
        }
    }
    text
}
