//! Element and attribute names of the two vocabularies

/// OpenOffice locale-description vocabulary.
pub mod oo {
    pub const LOCALE: &str = "Locale";
    pub const VERSION: &str = "version";
    pub const VERSION_DTD: &str = "versionDTD";
    pub const ALLOW_UPDATE_FROM_CLDR: &str = "allowUpdateFromCLDR";
    pub const REF: &str = "ref";
    pub const UNOID: &str = "unoid";
    pub const MSGID: &str = "msgid";
    pub const DEFAULT: &str = "default";
    pub const USAGE: &str = "usage";

    pub const LC_INFO: &str = "LC_INFO";
    pub const LANGUAGE: &str = "Language";
    pub const LANG_ID: &str = "LangID";
    pub const COUNTRY: &str = "Country";
    pub const COUNTRY_ID: &str = "CountryID";
    pub const DEFAULT_NAME: &str = "DefaultName";
    pub const PLATFORM: &str = "Platform";
    pub const PLATFORM_ID: &str = "PlatformID";

    pub const LC_CTYPE: &str = "LC_CTYPE";
    pub const SEPARATORS: &str = "Separators";
    pub const MARKERS: &str = "Markers";
    pub const DATE_SEPARATOR: &str = "DateSeparator";
    pub const THOUSAND_SEPARATOR: &str = "ThousandSeparator";
    pub const DECIMAL_SEPARATOR: &str = "DecimalSeparator";
    pub const TIME_SEPARATOR: &str = "TimeSeparator";
    pub const TIME_100SEC_SEPARATOR: &str = "Time100SecSeparator";
    pub const LIST_SEPARATOR: &str = "ListSeparator";
    pub const LONG_DATE_DAY_OF_WEEK_SEPARATOR: &str = "LongDateDayOfWeekSeparator";
    pub const LONG_DATE_DAY_SEPARATOR: &str = "LongDateDaySeparator";
    pub const LONG_DATE_MONTH_SEPARATOR: &str = "LongDateMonthSeparator";
    pub const LONG_DATE_YEAR_SEPARATOR: &str = "LongDateYearSeparator";
    pub const QUOTATION_START: &str = "QuotationStart";
    pub const QUOTATION_END: &str = "QuotationEnd";
    pub const DOUBLE_QUOTATION_START: &str = "DoubleQuotationStart";
    pub const DOUBLE_QUOTATION_END: &str = "DoubleQuotationEnd";
    pub const TIME_AM: &str = "TimeAM";
    pub const TIME_PM: &str = "TimePM";
    pub const MEASUREMENT_SYSTEM: &str = "MeasurementSystem";

    pub const LC_FORMAT: &str = "LC_FORMAT";
    pub const FORMAT_ELEMENT: &str = "FormatElement";
    pub const FORMAT_CODE: &str = "FormatCode";
    pub const REPLACE_FROM: &str = "replaceFrom";
    pub const REPLACE_TO: &str = "replaceTo";

    pub const LC_COLLATION: &str = "LC_COLLATION";
    pub const COLLATOR: &str = "Collator";
    pub const COLLATION_OPTIONS: &str = "CollationOptions";
    pub const TRANSLITERATION_MODULES: &str = "TransliterationModules";

    pub const LC_SEARCH: &str = "LC_SEARCH";
    pub const SEARCH_OPTIONS: &str = "SearchOptions";

    pub const LC_INDEX: &str = "LC_INDEX";
    pub const INDEX_KEY: &str = "IndexKey";
    pub const UNICODE_SCRIPT: &str = "UnicodeScript";
    pub const FOLLOW_PAGE_WORD: &str = "FollowPageWord";

    pub const LC_CALENDAR: &str = "LC_CALENDAR";
    pub const CALENDAR: &str = "Calendar";
    pub const DAYS_OF_WEEK: &str = "DaysOfWeek";
    pub const MONTHS_OF_YEAR: &str = "MonthsOfYear";
    pub const ERAS: &str = "Eras";
    pub const DAY: &str = "Day";
    pub const DAY_ID: &str = "DayID";
    pub const MONTH: &str = "Month";
    pub const MONTH_ID: &str = "MonthID";
    pub const ERA: &str = "Era";
    pub const ERA_ID: &str = "EraID";
    pub const DEFAULT_ABBRV_NAME: &str = "DefaultAbbrvName";
    pub const DEFAULT_FULL_NAME: &str = "DefaultFullName";
    pub const START_DAY_OF_WEEK: &str = "StartDayOfWeek";
    pub const MINIMAL_DAYS_IN_FIRST_WEEK: &str = "MinimalDaysInFirstWeek";

    pub const LC_CURRENCY: &str = "LC_CURRENCY";
    pub const CURRENCY: &str = "Currency";
    pub const CURRENCY_ID: &str = "CurrencyID";
    pub const CURRENCY_SYMBOL: &str = "CurrencySymbol";
    pub const BANK_SYMBOL: &str = "BankSymbol";
    pub const CURRENCY_NAME: &str = "CurrencyName";
    pub const DECIMAL_PLACES: &str = "DecimalPlaces";
    pub const USED_IN_COMPATIBLE_FORMAT_CODES: &str = "usedInCompatibleFormatCodes";
    pub const LEGACY_ONLY: &str = "legacyOnly";

    pub const LC_TRANSLITERATION: &str = "LC_TRANSLITERATION";
    pub const TRANSLITERATION: &str = "Transliteration";

    pub const LC_MISC: &str = "LC_MISC";
    pub const FORBIDDEN_CHARACTERS: &str = "ForbiddenCharacters";
    pub const FORBIDDEN_LINE_BEGIN_CHARACTERS: &str = "ForbiddenLineBeginCharacters";
    pub const FORBIDDEN_LINE_END_CHARACTERS: &str = "ForbiddenLineEndCharacters";
    pub const RESERVED_WORDS: &str = "ReservedWords";

    pub const LC_NUMBERING_LEVEL: &str = "LC_NumberingLevel";
    pub const NUMBERING_LEVEL: &str = "NumberingLevel";
    pub const LC_OUTLINE_NUMBERING_LEVEL: &str = "LC_OutLineNumberingLevel";
    pub const OUTLINE_STYLE: &str = "OutlineStyle";
    pub const OUTLINE_NUMBERING_LEVEL: &str = "OutLineNumberingLevel";

    /// Categories that may carry a `ref` attribute pointing at another
    /// locale's document.
    pub const REFERENCEABLE_CATEGORIES: &[&str] = &[
        LC_CTYPE,
        LC_FORMAT,
        LC_COLLATION,
        LC_SEARCH,
        LC_INDEX,
        LC_CALENDAR,
        LC_CURRENCY,
        LC_TRANSLITERATION,
        LC_MISC,
        LC_NUMBERING_LEVEL,
        LC_OUTLINE_NUMBERING_LEVEL,
    ];
}

/// CLDR/LDML vocabulary (the subset this tool emits).
pub mod ldml {
    pub const LDML: &str = "ldml";
    pub const IDENTITY: &str = "identity";
    pub const VERSION: &str = "version";
    pub const NUMBER: &str = "number";
    pub const GENERATION: &str = "generation";
    pub const LANGUAGE: &str = "language";
    pub const TERRITORY: &str = "territory";
    pub const TYPE: &str = "type";

    pub const DELIMITERS: &str = "delimiters";
    pub const QUOTATION_START: &str = "quotationStart";
    pub const QUOTATION_END: &str = "quotationEnd";
    pub const ALT_QUOTATION_START: &str = "alternateQuotationStart";
    pub const ALT_QUOTATION_END: &str = "alternateQuotationEnd";

    pub const NUMBERS: &str = "numbers";
    pub const SYMBOLS: &str = "symbols";
    pub const DECIMAL: &str = "decimal";
    pub const GROUP: &str = "group";
    pub const LIST: &str = "list";

    pub const DATES: &str = "dates";
    pub const CALENDARS: &str = "calendars";
    pub const CALENDAR: &str = "calendar";
    pub const MONTHS: &str = "months";
    pub const MONTH_CONTEXT: &str = "monthContext";
    pub const MONTH_WIDTH: &str = "monthWidth";
    pub const MONTH: &str = "month";
    pub const DAYS: &str = "days";
    pub const DAY_CONTEXT: &str = "dayContext";
    pub const DAY_WIDTH: &str = "dayWidth";
    pub const DAY: &str = "day";
    pub const ERAS: &str = "eras";
    pub const ERA_ABBR: &str = "eraAbbr";
    pub const ERA_NAMES: &str = "eraNames";
    pub const ERA: &str = "era";
    pub const WEEK: &str = "week";
    pub const FIRST_DAY: &str = "firstDay";
    pub const MIN_DAYS: &str = "minDays";
    pub const COUNT: &str = "count";
    pub const DAY_ATTR: &str = "day";
    pub const ALIAS: &str = "alias";
    pub const SOURCE: &str = "source";

    pub const FORMAT: &str = "format";
    pub const WIDE: &str = "wide";
    pub const ABBREVIATED: &str = "abbreviated";

    pub const AM: &str = "am";
    pub const PM: &str = "pm";
    pub const MEASUREMENT: &str = "measurement";
    pub const MEASUREMENT_SYSTEM: &str = "measurementSystem";
}
