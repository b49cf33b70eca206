//! LLM prompts for competitor extraction, stage research, and CSV
//! segmentation.
//!
//! Each startup stage selects a distinct research template with its own
//! required context; stage selection happens at the boundary, never by
//! fallback.

use crate::types::{CompetitorExtraction, ResearchRequest, Stage};

/// System prompt for the stage-level synthesis call.
pub const ANALYST_SYSTEM_PROMPT: &str = "You are an expert market research analyst specializing \
in ICP discovery and competitive intelligence. Provide data-backed, actionable insights. \
Always structure your response as valid JSON.";

/// Prompt for extracting structured competitor data from fetched HTML.
pub const COMPETITOR_EXTRACTION_PROMPT: &str = r#"Extract key information from this competitor's website HTML.

URL: {url}

HTML Content (truncated):
{content}

Extract and return a JSON object with:
{
  "description": "Brief 1-2 sentence company description",
  "pricingTiers": [
    {
      "tier": "Tier name (e.g., Free, Pro, Enterprise)",
      "price": "Price (e.g., $0/mo, $49/mo, Contact sales)",
      "features": ["Key feature 1", "Key feature 2", ...]
    }
  ],
  "features": ["Core feature 1", "Core feature 2", ...],
  "targetMarket": "Who they target (e.g., 'SMBs', 'Enterprise teams', 'Developers')",
  "positioning": "How they position themselves (1-2 sentences)",
  "testimonials": [
    {
      "quote": "Testimonial text",
      "company": "Company name (if available)",
      "role": "Person's role (if available)"
    }
  ]
}

IMPORTANT:
- Only extract data that is clearly visible in the HTML
- If pricing is not found, return empty array
- If testimonials not found, return empty array
- Keep features concise (max 10)
- Base everything on actual content, don't make assumptions
- Return valid JSON only, no markdown formatting"#;

const PRE_LAUNCH_PROMPT: &str = r#"Conduct comprehensive ICP discovery research for a PRE-LAUNCH startup.

Product: {product}
Target Market: {target_market}
{competitor_section}

As a market research analyst, provide:

1. **Competitor Analysis** (based on scraped data if available):
   - For each competitor: positioning, strengths, weaknesses, pricing strategy
   - Market gaps and opportunities
   - Competitive differentiation recommendations

2. **ICP Hypothesis** (3 segments, prioritized):
   Based on competitor customers and market signals, identify:
   - Segment name and description
   - Firmographics (company size, industry, revenue)
   - Decision maker profile (role, seniority, team size)
   - Pain points (specific, evidence-based)
   - Buying triggers
   - Where to find them (communities, channels, search terms)
   - Why this segment will buy (rationale)

3. **Market Analysis**:
   - TAM/SAM/SOM estimates (with sources/methodology)
   - Market growth trends
   - Key dynamics affecting the market

4. **Strategic Frameworks**:
   - SWOT analysis for top 3 competitors
   - Porter's Five Forces analysis
   - Positioning recommendation

5. **GTM Strategy**:
   - Recommended positioning statement
   - Pricing strategy (based on competitor analysis)
   - Top 3 GTM channels with rationale
   - First 90-day action plan

Return structured JSON following this format:
{
  "competitors": [/* competitor profiles */],
  "icpProfiles": [/* 3 ICP segments */],
  "marketData": {/* TAM/SAM/SOM */},
  "swotAnalyses": [/* SWOT for top 3 */],
  "portersFiveForces": {/* analysis */},
  "positioning": {/* recommendation */},
  "pricing": {/* strategy */},
  "gtmChannels": [/* top 3 */],
  "actionPlan": [/* 90-day plan */]
}"#;

const EARLY_STAGE_PROMPT: &str = r#"Conduct ICP validation research for an EARLY-STAGE startup (1-20 customers).

Product: {product}
Target Market: {target_market}
Early Customer Patterns: {customer_patterns}
{competitor_section}

As a market research analyst, provide:

1. **Customer Pattern Analysis**:
   - Validate patterns from early customers
   - Identify converging vs non-converging profiles
   - Recommend which segments to double down on

2. **Validated ICP Segments** (3 segments):
   - Primary: Based on best-converting customers
   - Secondary: Adjacent opportunity
   - Tertiary: Future potential
   For each: firmographics, decision maker, pain points, conversion insights

3. **Competitor Positioning**:
   - How competitors position against these ICPs
   - Gaps in their offering
   - Your differentiation opportunity

4. **Optimization Recommendations**:
   - Which customer type to focus on (data-backed)
   - Which to avoid (with reasoning)
   - Channel recommendations
   - Next 20 customers: specific targeting criteria

Return structured JSON with the same format as pre-launch:
{
  "competitors": [], "icpProfiles": [], "marketData": {},
  "swotAnalyses": [], "portersFiveForces": {}, "positioning": {},
  "pricing": {}, "gtmChannels": [], "actionPlan": []
}"#;

const POST_REVENUE_PROMPT: &str = r#"Conduct quantitative ICP analysis for a POST-REVENUE startup (20-100 customers).

Product: {product}
Target Market: {target_market}
{csv_section}
{competitor_section}

As a market research analyst, provide:

1. **Data-Driven ICP Analysis**:
   - Use the customer data analysis to identify winning segments
   - Segment by conversion rate, LTV, churn
   - Identify highest-value customers
   - Pinpoint segments to avoid

2. **Competitive Intelligence**:
   - Deep SWOT for each competitor
   - Your positioning vs competitors for each segment
   - Pricing optimization based on segment value

3. **Scaling Strategy**:
   - Which ICP to scale (with ROI projections)
   - Channel allocation by segment
   - Expansion opportunities
   - Next 100 customers: precise targeting

4. **Optimization Roadmap**:
   - Quick wins (30 days)
   - Medium-term improvements (90 days)
   - Long-term strategy (12 months)

Return structured JSON with quantitative metrics included, using keys:
competitors, icpProfiles, marketData, swotAnalyses, portersFiveForces,
positioning, pricing, gtmChannels, actionPlan"#;

const SCALE_UP_PROMPT: &str = r#"Conduct advanced segmentation research for a SCALE-UP (100+ customers).

Product: {product}
Target Market: {target_market}
{csv_section}
{competitor_section}

As a market research analyst, provide:

1. **Advanced Segmentation**:
   - Cohort analysis of customer segments
   - LTV/CAC by segment
   - Identify expansion opportunities within existing segments
   - New adjacent ICPs for market expansion

2. **Competitive Landscape**:
   - Market share estimates
   - Competitive positioning by segment
   - Threats and opportunities
   - Moat-building recommendations

3. **Growth Strategy**:
   - Current segment optimization
   - New segment expansion plan
   - Enterprise readiness assessment
   - International expansion considerations (if applicable)

4. **Strategic Roadmap**:
   - Immediate optimizations (30 days)
   - Growth initiatives (6 months)
   - Strategic positioning (12-24 months)

Return comprehensive JSON with segment metrics, market sizing, and
strategic recommendations, using keys: competitors, icpProfiles,
marketData, swotAnalyses, portersFiveForces, positioning, pricing,
gtmChannels, actionPlan"#;

/// Prompt for segmenting uploaded customer data.
pub const SEGMENTATION_PROMPT: &str = r#"Analyze this customer data and identify segments with distinct characteristics.

Customer Data ({total_records} records):
{records}
{cap_note}

Perform comprehensive segmentation analysis:

1. Identify 3-5 customer segments based on:
   - Role/Title patterns
   - Company size/industry patterns
   - Deal value patterns
   - Usage/behavior patterns (if data available)
   - Churn patterns (if status/churn data available)

2. For each segment, calculate/estimate:
   - Number of customers
   - Average deal size
   - Conversion rate (if data supports it)
   - Estimated LTV
   - Churn rate (if status data available)
   - Key traits that define this segment

3. Provide insights:
   - Which segment is most valuable?
   - Which segment should be avoided (high churn, low value)?
   - What patterns predict success?

Return a JSON object:
{
  "segments": [
    {
      "name": "Segment name (e.g., 'Mid-Market SaaS CTOs')",
      "count": number,
      "avgDealSize": number,
      "conversionRate": "XX%",
      "ltv": number,
      "churnRate": "XX%",
      "traits": ["Trait 1", "Trait 2", ...]
    }
  ],
  "insights": ["Key insight 1", "Key insight 2", ...],
  "recommendations": ["Actionable recommendation 1", ...],
  "winningProfile": "Description of the highest-value customer profile",
  "segmentToAvoid": "Description of segment to avoid (if applicable)"
}

IMPORTANT:
- Base analysis on actual data patterns
- If certain metrics aren't available in the data, make reasonable estimates based on patterns
- Be specific and quantitative
- Return valid JSON only"#;

/// Format the competitor extraction prompt with fetched content.
pub fn format_competitor_prompt(url: &str, content: &str) -> String {
    COMPETITOR_EXTRACTION_PROMPT
        .replace("{url}", url)
        .replace("{content}", content)
}

/// Build the stage-specific research prompt.
///
/// Every stage produces a distinct, non-empty prompt; the context each one
/// assembles differs (early-stage consumes customer patterns, post-revenue
/// and scale-up consume the CSV segmentation result).
pub fn format_research_prompt(
    request: &ResearchRequest,
    competitors: &[CompetitorExtraction],
) -> String {
    let target_market = request.target_market.as_deref().unwrap_or("Not specified");
    let competitor_section = competitor_section(competitors);

    let template = match request.stage {
        Stage::PreLaunch => PRE_LAUNCH_PROMPT.to_string(),
        Stage::EarlyStage => {
            let patterns = request
                .additional_context
                .as_ref()
                .and_then(|ctx| ctx.get("customerPatterns"))
                .and_then(|v| v.as_str())
                .unwrap_or("Not provided")
                .to_string();
            EARLY_STAGE_PROMPT.replace("{customer_patterns}", &patterns)
        }
        Stage::PostRevenue => POST_REVENUE_PROMPT.replace("{csv_section}", &csv_section(request)),
        Stage::ScaleUp => SCALE_UP_PROMPT.replace("{csv_section}", &csv_section(request)),
    };

    template
        .replace("{product}", &request.product)
        .replace("{target_market}", target_market)
        .replace("{competitor_section}", &competitor_section)
}

/// Format the CSV segmentation prompt over capped records.
pub fn format_segmentation_prompt(records: &[serde_json::Value], total_records: usize) -> String {
    let records_json =
        serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string());

    let cap_note = if total_records > records.len() {
        format!("\n... (showing first {} records)", records.len())
    } else {
        String::new()
    };

    SEGMENTATION_PROMPT
        .replace("{total_records}", &total_records.to_string())
        .replace("{records}", &records_json)
        .replace("{cap_note}", &cap_note)
}

fn competitor_section(competitors: &[CompetitorExtraction]) -> String {
    if competitors.is_empty() {
        return String::new();
    }

    let json = serde_json::to_string_pretty(competitors).unwrap_or_else(|_| "[]".to_string());
    format!("\nCompetitor Data:\n{}", json)
}

fn csv_section(request: &ResearchRequest) -> String {
    match &request.csv_analysis {
        Some(analysis) => {
            let json =
                serde_json::to_string_pretty(analysis).unwrap_or_else(|_| "{}".to_string());
            format!("\nCustomer Data Analysis:\n{}", json)
        }
        None => String::new(),
    }
}
