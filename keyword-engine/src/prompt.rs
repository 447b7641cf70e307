use chrono::NaiveDate;
use trendseed_core::KeywordConfig;

/// Builds the keyword request for `date`.
///
/// The answer is asked for in Korean and as a bare JSON object so the
/// normalizer can parse it without extra cleanup.
pub fn build_prompt(config: &KeywordConfig, date: NaiveDate) -> String {
    let today = date.format("%Y년 %m월 %d일");
    let seeds = config.seed_keywords.join(", ");
    let count = config.keyword_count;

    format!(
        "{today} 기준, 대한민국 최신 트렌드를 종합적으로 반영하여 블로그 글감으로 활용할 '롱테일 키워드'를 {count}개 생성해줘.\n\
         \n\
         다음 씨앗 키워드들을 참고하되, 여기에 없는 완전히 새로운 분야의 키워드도 적극적으로 포함시켜줘.\n\
         씨앗 키워드: {seeds}\n\
         \n\
         [규칙]\n\
         - IT, 건강, 경제, 여행, 문화, 라이프스타일 등 다양한 주제를 포함해야 해.\n\
         - 각 키워드는 '2025년 다이어리 추천', '겨울철 실내 데이트 코스' 처럼 구체적인 검색어 형태여야 해.\n\
         - 결과는 반드시 {{ 'keywords': ['키워드1', '키워드2', ...] }} 형식의 JSON 객체로만 응답해야 해. 다른 설명은 절대 추가하지 마.\n"
    )
}
